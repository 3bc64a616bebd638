//! AWS service clients

/// Shared utilities used by the service clients.
pub mod common;

mod aws;

pub use aws::{AwsClient, AwsClientBuilder};
