//! Provider error → operator diagnostic
//!
//! Classification is keyed on the structured [`ProviderError`] variant. Message
//! substrings are consulted only as a best-effort fallback for `AccessDenied`
//! and `Unknown`, where some partitions and proxies report a generic code and
//! put the real cause in the message.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use dns_access_broker_provider::ProviderError;

use crate::error::{Diagnostic, ErrorCategory};

/// Operation that produced a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// `sts:AssumeRole`
    RoleAssumption,
    /// `route53:ListHostedZones` (coarse probe)
    ListZones,
    /// `route53:GetHostedZone` (targeted probe)
    GetZone,
}

impl Operation {
    /// Action name used in diagnostics.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::RoleAssumption => "assume role",
            Self::ListZones => "list zones",
            Self::GetZone => "access zone",
        }
    }

    fn is_dns(self) -> bool {
        !matches!(self, Self::RoleAssumption)
    }
}

// Fallback substrings
const NOT_AUTHORIZED_HINT: &str = "not authorized to perform";
const ZONE_MISSING_HINT: &str = "No hosted zone found";
const ROLE_MISSING_HINTS: &[&str] = &["does not exist", "cannot be found"];

/// Maps provider errors to remediation-oriented diagnostics.
///
/// Pure and total: every `(error, operation)` pair yields exactly one
/// non-empty diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classifies `error` raised by `operation`.
    pub fn classify(error: &ProviderError, operation: Operation) -> Diagnostic {
        if operation.is_dns() {
            Self::classify_dns(error, operation)
        } else {
            Self::classify_role_assumption(error)
        }
    }

    fn classify_role_assumption(error: &ProviderError) -> Diagnostic {
        match error {
            ProviderError::ExpiredToken { .. } => Diagnostic::new(
                ErrorCategory::TransientCredential,
                Self::role_fallback_text(error),
            ),
            ProviderError::RoleNotFound { .. } => Self::role_not_found(),
            ProviderError::AccessDenied { raw_message, .. } => {
                if looks_like_missing_role(raw_message) {
                    Self::role_not_found()
                } else {
                    Self::role_access_denied()
                }
            }
            ProviderError::Unknown { raw_message, .. } => {
                if raw_message.contains(NOT_AUTHORIZED_HINT) {
                    Self::role_access_denied()
                } else if looks_like_missing_role(raw_message) {
                    Self::role_not_found()
                } else {
                    Diagnostic::new(
                        ErrorCategory::UnclassifiedProvider,
                        Self::role_fallback_text(error),
                    )
                }
            }
            _ => Diagnostic::new(
                ErrorCategory::UnclassifiedProvider,
                Self::role_fallback_text(error),
            ),
        }
    }

    fn classify_dns(error: &ProviderError, operation: Operation) -> Diagnostic {
        match error {
            ProviderError::AccessDenied { .. } => Self::route53_access_denied(operation),
            ProviderError::HostedZoneNotFound { raw_message, .. } => {
                Self::zone_not_found(raw_message)
            }
            ProviderError::Unknown { raw_message, .. } => {
                if raw_message.contains(NOT_AUTHORIZED_HINT) {
                    Self::route53_access_denied(operation)
                } else if raw_message.contains(ZONE_MISSING_HINT) {
                    Self::zone_not_found(raw_message)
                } else {
                    Self::route53_fallback(error, operation)
                }
            }
            _ => Self::route53_fallback(error, operation),
        }
    }

    // ==================== diagnostic texts ====================

    fn role_access_denied() -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::Authorization,
            "Access Denied: Role assumption failed. Please check:\n  \
             1. Trust relationship in DNS account role\n  \
             2. External ID matches configuration\n  \
             3. App account role has permission to assume DNS role",
        )
    }

    fn role_not_found() -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::NotFound,
            "Role not found: The specified DNS role does not exist",
        )
    }

    fn role_fallback_text(error: &ProviderError) -> String {
        format!("AWS Error: {}: {}", error.code(), display_message(error))
    }

    fn route53_access_denied(operation: Operation) -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::Authorization,
            format!(
                "Route53 Access Denied: Unable to {}. Please check:\n  \
                 1. DNS role has correct Route53 permissions\n  \
                 2. Hosted zone exists in DNS account\n  \
                 3. IAM policy includes required Route53 actions",
                operation.action_label()
            ),
        )
    }

    fn zone_not_found(message: &str) -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::NotFound,
            format!("Hosted zone not found: {message}"),
        )
    }

    fn route53_fallback(error: &ProviderError, operation: Operation) -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::UnclassifiedProvider,
            format!(
                "Route53 Error ({}): {}: {}",
                operation.action_label(),
                error.code(),
                display_message(error)
            ),
        )
    }

    // ==================== local failures ====================

    /// Transient failures persisted through every allowed attempt.
    pub fn retries_exhausted(attempts: u32) -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::TransientCredential,
            format!("Token expired and max retries reached ({attempts} attempts)"),
        )
    }

    /// Verification was requested without a session.
    pub fn no_session() -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::Precondition,
            "No DNS session established. Call assume_role first.",
        )
    }

    /// Verification was requested with a session whose credentials already expired.
    pub fn session_expired(expires_at: DateTime<Utc>) -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::Precondition,
            format!(
                "DNS session credentials expired at {}",
                expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
        )
    }

    /// The caller cancelled while a retry delay was pending.
    pub fn cancelled() -> Diagnostic {
        Diagnostic::new(
            ErrorCategory::Cancelled,
            "Operation cancelled while waiting to retry role assumption",
        )
    }
}

/// Role ARNs in STS messages read `.../role/<name> not found` or similar.
fn looks_like_missing_role(message: &str) -> bool {
    (message.contains("role/") && message.contains(" not found"))
        || ROLE_MISSING_HINTS.iter().any(|hint| message.contains(hint))
}

/// Message for the fallback text; never empty.
fn display_message(error: &ProviderError) -> String {
    let message = error.message();
    if message.is_empty() {
        error.to_string()
    } else {
        message.to_string()
    }
}
