//! AWS STS + Route53 client

mod error;
mod http;
mod provider;
mod route53;
mod sign;
mod sts;
/// AWS API-specific request/response types.
pub(crate) mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};
use crate::types::{AwsCredentials, EndpointConfig};

/// STS API version sent with every query-protocol request.
pub(crate) const STS_API_VERSION: &str = "2011-06-15";
/// Route53 REST API version prefix.
pub(crate) const ROUTE53_API_VERSION: &str = "2013-04-01";
/// Route53 is signed for `us-east-1` regardless of the caller's region.
pub(crate) const ROUTE53_SIGNING_REGION: &str = "us-east-1";

/// AWS client for the cross-account access workflow.
///
/// Signs `AssumeRole` with the application-account credentials it was built
/// with, and signs Route53 probes with the temporary credentials carried by the
/// [`Session`](crate::Session) passed to each call. Holds no per-invocation state,
/// so one client can serve any number of concurrent workflows.
///
/// # Construction
///
/// ```rust,no_run
/// use std::time::Duration;
/// use dns_access_broker_provider::{AwsClient, AwsCredentials};
///
/// let client = AwsClient::builder(AwsCredentials::new("AKIA...", "secret", None))
///     .request_timeout(Duration::from_secs(20))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct AwsClient {
    pub(crate) client: Client,
    pub(crate) credentials: AwsCredentials,
    pub(crate) endpoints: EndpointConfig,
    pub(crate) max_retries: u32,
}

/// Builder for [`AwsClient`] with configurable endpoints, timeouts and transport retries.
pub struct AwsClientBuilder {
    credentials: AwsCredentials,
    endpoints: EndpointConfig,
    connect_timeout: Duration,
    request_timeout: Duration,
    max_retries: u32,
}

impl AwsClientBuilder {
    fn new(credentials: AwsCredentials) -> Self {
        Self {
            credentials,
            endpoints: EndpointConfig::default(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: 0,
        }
    }

    /// Override the STS/Route53 endpoints (default: global endpoints, `us-east-1`).
    pub fn endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the per-request timeout applied to every call (default: 30s).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the TCP connect timeout (default: 10s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the number of automatic retries for network errors, timeouts and
    /// throttling (default: 0). API errors are never retried here.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`AwsClient`] instance.
    pub fn build(self) -> Result<AwsClient> {
        Ok(AwsClient {
            client: create_http_client(self.connect_timeout, self.request_timeout)?,
            credentials: self.credentials,
            endpoints: self.endpoints,
            max_retries: self.max_retries,
        })
    }
}

impl AwsClient {
    /// Returns a builder for customizing the client configuration.
    pub fn builder(credentials: AwsCredentials) -> AwsClientBuilder {
        AwsClientBuilder::new(credentials)
    }
}
