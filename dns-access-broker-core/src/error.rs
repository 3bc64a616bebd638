//! Unified error type definition

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dns_access_broker_provider::ProviderError;

/// Core layer error type
///
/// Raised for local contract violations (bad configuration, empty request
/// fields). Workflow failures are reported as [`Diagnostic`]s instead.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Failure category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    /// Token-expiry race during role assumption; retried up to the configured limit.
    TransientCredential,
    /// Trust policy, external id mismatch or missing permission. Never retried.
    Authorization,
    /// Referenced role or hosted zone does not exist. Never retried.
    NotFound,
    /// Caller violated a local contract (no session, expired session, empty input).
    Precondition,
    /// The calling context cancelled the operation.
    Cancelled,
    /// Any other provider-reported or transport failure, surfaced verbatim.
    UnclassifiedProvider,
}

impl ErrorCategory {
    /// Whether the role assumer may retry a failure of this category.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::TransientCredential)
    }
}

/// Human-readable, remediation-oriented failure description.
///
/// `Display` renders only the message, so a diagnostic can be prefixed and
/// handed to an operator as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Category the failure was classified into.
    pub category: ErrorCategory,
    /// Operator-facing message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Same category, message prefixed with the failing step.
    #[must_use]
    pub fn prefixed(self, prefix: &str) -> Self {
        Self {
            category: self.category,
            message: format!("{prefix}{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Diagnostic {}

impl From<CoreError> for Diagnostic {
    fn from(err: CoreError) -> Self {
        Self::new(ErrorCategory::Precondition, err.to_string())
    }
}
