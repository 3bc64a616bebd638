//! # dns-access-broker-provider
//!
//! Wire-level clients for the two AWS control planes involved in brokering
//! cross-account DNS access:
//!
//! | Service | Operations | Auth Method |
//! |---------|------------|-------------|
//! | STS | `AssumeRole` | SigV4 with the application-account credentials |
//! | Route53 | `ListHostedZones`, `GetHostedZone` | SigV4 with the assumed temporary credentials |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static builds and cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_access_broker_provider::{
//!     AssumeRoleParams, AwsClient, AwsCredentials, CrossAccountApi, Session,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AwsClient::builder(AwsCredentials::new("AKIA...", "secret", None)).build()?;
//!
//!     let params = AssumeRoleParams {
//!         role_arn: "arn:aws:iam::123456789012:role/certbot-dns-role".to_string(),
//!         role_session_name: "CertbotDNS-1700000000".to_string(),
//!         external_id: "shared-external-id".to_string(),
//!         duration_seconds: 900,
//!     };
//!     let credentials = client.assume_role(&params).await?;
//!     let session = Session::new(credentials, client.endpoints().clone());
//!
//!     client.list_hosted_zones(&session, 1).await?;
//!     client.get_hosted_zone(&session, "Z0123456789ABCDEFGHIJ").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Raw AWS
//! error codes are mapped onto structured variants:
//!
//! - [`ProviderError::AccessDenied`]: the caller is not authorized
//! - [`ProviderError::ExpiredToken`]: the signing token had already expired
//! - [`ProviderError::HostedZoneNotFound`]: `NoSuchHostedZone`
//! - [`ProviderError::Unknown`]: anything not mapped, with the raw code preserved
//!
//! [`ProviderError::code`] and [`ProviderError::message`] expose the normalized
//! `{code, message}` pair for downstream classification.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export the capability trait (internal traits are not exported)
pub use traits::CrossAccountApi;

// Re-export types
pub use types::{
    AssumeRoleParams, AwsCredentials, EndpointConfig, Session, TemporaryCredentials,
};

// Re-export the production client
pub use providers::{AwsClient, AwsClientBuilder};

// Re-export utils module
pub use utils::log_sanitizer;
