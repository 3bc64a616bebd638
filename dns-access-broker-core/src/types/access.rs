//! Terminal result of the access setup workflow

use dns_access_broker_provider::Session;

use crate::error::{Diagnostic, ErrorCategory};

/// Outcome of `setup_access`.
///
/// `diagnostic` and `category` are populated only on failure; `session` only on
/// success.
#[derive(Debug, Clone)]
pub struct AccessResult {
    /// Whether a verified, usable session was obtained.
    pub success: bool,
    /// Operator-facing failure description, prefixed with the failing step.
    pub diagnostic: Option<String>,
    /// Failure category, for callers that branch on the kind of failure.
    pub category: Option<ErrorCategory>,
    /// Verified session usable for further Route53 calls.
    pub session: Option<Session>,
}

impl AccessResult {
    /// Successful outcome carrying the verified session.
    pub fn granted(session: Session) -> Self {
        Self {
            success: true,
            diagnostic: None,
            category: None,
            session: Some(session),
        }
    }

    /// Failed outcome.
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            success: false,
            diagnostic: Some(diagnostic.message),
            category: Some(diagnostic.category),
            session: None,
        }
    }

    /// Converts into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<Session, Diagnostic> {
        if self.success {
            if let Some(session) = self.session {
                return Ok(session);
            }
        }
        Err(Diagnostic::new(
            self.category.unwrap_or(ErrorCategory::UnclassifiedProvider),
            self.diagnostic.unwrap_or_default(),
        ))
    }
}
