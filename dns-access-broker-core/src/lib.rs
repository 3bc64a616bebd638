//! DNS Access Broker Core Library
//!
//! Brokers temporary, cross-account access to Route53 so a DNS-01 challenge
//! workflow can run against a hosted zone owned by another AWS account:
//! - Role Assumer: `AssumeRole` with an external id, bounded retry on expired tokens
//! - Access Verifier: two escalating read-only Route53 probes
//! - Error Classifier: provider errors to remediation-oriented diagnostics
//! - Access Setup Service: sequences the above and returns a usable session
//!
//! The AWS wire protocol lives in `dns-access-broker-provider`; everything here
//! is written against its `CrossAccountApi` trait.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, Diagnostic, ErrorCategory};
pub use services::{AccessSetupService, AccessVerifier, ErrorClassifier, Operation, RoleAssumer};
pub use traits::{RetrySleeper, TokioSleeper};
pub use types::{AccessConfig, AccessResult, RoleAssumptionRequest};

// Re-export provider types that appear in this crate's API
pub use dns_access_broker_provider::{CrossAccountApi, ProviderError, Session};
pub use tokio_util::sync::CancellationToken;
