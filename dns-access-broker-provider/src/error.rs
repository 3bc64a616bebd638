use serde::{Deserialize, Serialize};

/// Unified error type for STS and Route53 operations.
///
/// Each variant includes a `provider` field identifying which service produced the error
/// (`"sts"` or `"route53"`), plus variant-specific context. All variants are serializable
/// for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transport-level failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API throttling
///
/// The built-in HTTP client retries these with exponential backoff when the client is
/// configured with a non-zero transport retry budget. [`ExpiredToken`](Self::ExpiredToken)
/// is deliberately *not* retried here; credential-level retry is the caller's policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Service that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Service that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The signing credentials are unknown to the service or the signature is malformed.
    InvalidCredentials {
        /// Service that produced the error.
        provider: String,
        /// Raw error code from the API.
        raw_code: String,
        /// Original error message from the API.
        raw_message: String,
    },

    /// The security token included in the request had expired.
    ExpiredToken {
        /// Service that produced the error.
        provider: String,
        /// Raw error code from the API.
        raw_code: String,
        /// Original error message from the API.
        raw_message: String,
    },

    /// The authenticated principal is not authorized to perform the request.
    AccessDenied {
        /// Service that produced the error.
        provider: String,
        /// Raw error code from the API.
        raw_code: String,
        /// Original error message from the API.
        raw_message: String,
    },

    /// The role referenced by an `AssumeRole` call does not exist.
    RoleNotFound {
        /// Service that produced the error.
        provider: String,
        /// Role ARN that was requested, if known.
        role_arn: String,
        /// Original error message from the API.
        raw_message: String,
    },

    /// The referenced hosted zone does not exist (`NoSuchHostedZone`).
    HostedZoneNotFound {
        /// Service that produced the error.
        provider: String,
        /// Hosted zone id that was requested, if known.
        hosted_zone_id: String,
        /// Original error message from the API.
        raw_message: String,
    },

    /// A request parameter was rejected by the API.
    InvalidParameter {
        /// Service that produced the error.
        provider: String,
        /// Raw error code from the API.
        raw_code: String,
        /// Original error message from the API.
        raw_message: String,
    },

    /// The API throttled the request.
    RateLimited {
        /// Service that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Service that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to build a request.
    SerializationError {
        /// Service that produced the error.
        provider: String,
        /// Details about the failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Service that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Normalized error code.
    ///
    /// For API errors this is the raw AWS code where one was reported; transport and
    /// local failures use the variant name.
    pub fn code(&self) -> &str {
        match self {
            Self::NetworkError { .. } => "NetworkError",
            Self::Timeout { .. } => "Timeout",
            Self::InvalidCredentials { raw_code, .. }
            | Self::ExpiredToken { raw_code, .. }
            | Self::AccessDenied { raw_code, .. }
            | Self::InvalidParameter { raw_code, .. } => raw_code,
            Self::RoleNotFound { .. } => "NoSuchEntity",
            Self::HostedZoneNotFound { .. } => "NoSuchHostedZone",
            Self::RateLimited { .. } => "Throttling",
            Self::ParseError { .. } => "ParseError",
            Self::SerializationError { .. } => "SerializationError",
            Self::Unknown { raw_code, .. } => raw_code.as_deref().unwrap_or("Unknown"),
        }
    }

    /// Raw message reported by the API, or the local failure detail.
    pub fn message(&self) -> &str {
        match self {
            Self::NetworkError { detail, .. }
            | Self::Timeout { detail, .. }
            | Self::ParseError { detail, .. }
            | Self::SerializationError { detail, .. } => detail,
            Self::InvalidCredentials { raw_message, .. }
            | Self::ExpiredToken { raw_message, .. }
            | Self::AccessDenied { raw_message, .. }
            | Self::RoleNotFound { raw_message, .. }
            | Self::HostedZoneNotFound { raw_message, .. }
            | Self::InvalidParameter { raw_message, .. }
            | Self::Unknown { raw_message, .. } => raw_message,
            Self::RateLimited { raw_message, .. } => raw_message.as_deref().unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] Invalid credentials: {raw_message}"),
            Self::ExpiredToken {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] Expired token: {raw_message}"),
            Self::AccessDenied {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] Access denied: {raw_message}"),
            Self::RoleNotFound {
                provider, role_arn, ..
            } => write!(f, "[{provider}] Role '{role_arn}' not found"),
            Self::HostedZoneNotFound {
                provider,
                hosted_zone_id,
                ..
            } => write!(f, "[{provider}] Hosted zone '{hosted_zone_id}' not found"),
            Self::InvalidParameter {
                provider,
                raw_code,
                raw_message,
            } => write!(f, "[{provider}] Invalid parameter ({raw_code}): {raw_message}"),
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
