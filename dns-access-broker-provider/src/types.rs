use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Credentials ============

/// Long-lived (or ambient) credentials of the application account.
///
/// Used only to sign the `AssumeRole` call. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token, when the application account itself runs on temporary credentials.
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Creates a credential set.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Short-lived credentials returned by `AssumeRole`.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    /// Temporary access key id (`ASIA...`).
    pub access_key_id: String,
    /// Temporary secret access key.
    pub secret_access_key: String,
    /// Session token that must accompany every signed request.
    pub session_token: String,
    /// Instant after which the credentials are rejected.
    pub expires_at: DateTime<Utc>,
}

impl TemporaryCredentials {
    /// Signing view of these credentials.
    pub fn as_signing_credentials(&self) -> AwsCredentials {
        AwsCredentials {
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            session_token: Some(self.session_token.clone()),
        }
    }
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// ============ Endpoints ============

/// Default signing region for both services.
pub(crate) const DEFAULT_REGION: &str = "us-east-1";
/// Global STS endpoint.
pub(crate) const DEFAULT_STS_ENDPOINT: &str = "https://sts.amazonaws.com";
/// Route53 is a global service with a single endpoint.
pub(crate) const DEFAULT_ROUTE53_ENDPOINT: &str = "https://route53.amazonaws.com";

/// Endpoint context needed to issue STS and Route53 calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// STS base URL (scheme + host, no trailing slash).
    pub sts_endpoint: String,
    /// Route53 base URL (scheme + host, no trailing slash).
    pub route53_endpoint: String,
    /// SigV4 region used for STS. Route53 is always signed for `us-east-1`.
    pub region: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            sts_endpoint: DEFAULT_STS_ENDPOINT.to_string(),
            route53_endpoint: DEFAULT_ROUTE53_ENDPOINT.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Uses the regional STS endpoint (`https://sts.{region}.amazonaws.com`).
    pub fn regional(region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            sts_endpoint: format!("https://sts.{region}.amazonaws.com"),
            route53_endpoint: DEFAULT_ROUTE53_ENDPOINT.to_string(),
            region,
        }
    }

    /// Host part of an endpoint URL, as used in the `Host` header.
    pub(crate) fn host_of(endpoint: &str) -> &str {
        let without_scheme = endpoint
            .split_once("://")
            .map_or(endpoint, |(_, rest)| rest);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }
}

// ============ Session ============

/// Opaque handle wrapping temporary credentials plus the endpoint context
/// needed to issue further Route53 calls.
///
/// Cloning is cheap; clones share the same immutable credentials. There is no
/// revocation: a session is simply dropped or left to expire.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    credentials: TemporaryCredentials,
    endpoints: EndpointConfig,
}

impl Session {
    /// Wraps freshly issued credentials.
    pub fn new(credentials: TemporaryCredentials, endpoints: EndpointConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                credentials,
                endpoints,
            }),
        }
    }

    /// Temporary credentials carried by this session.
    pub fn credentials(&self) -> &TemporaryCredentials {
        &self.inner.credentials
    }

    /// Endpoint context carried by this session.
    pub fn endpoints(&self) -> &EndpointConfig {
        &self.inner.endpoints
    }

    /// Expiry of the underlying credentials.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.inner.credentials.expires_at
    }

    /// Whether the credentials are expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.inner.credentials.expires_at
    }

    /// Whether the credentials are expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether two handles share the same underlying credentials.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.inner.credentials)
            .field("endpoints", &self.inner.endpoints)
            .finish()
    }
}

// ============ Requests ============

/// Parameters of a single `AssumeRole` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleParams {
    /// `arn:aws:iam::{account}:role/{name}`.
    pub role_arn: String,
    /// Unique session name, at most 64 characters.
    pub role_session_name: String,
    /// External id required by the role's trust policy.
    pub external_id: String,
    /// Requested credential lifetime.
    pub duration_seconds: i32,
}
