//! Environment-driven configuration

use std::time::Duration;

use anyhow::{bail, Context, Result};
use dns_access_broker_core::AccessConfig;
use dns_access_broker_provider::{AwsCredentials, EndpointConfig};

/// Everything the binary needs, read from the process environment.
#[derive(Debug)]
pub struct CliConfig {
    pub dns_account_id: String,
    pub dns_role_name: String,
    pub external_id: String,
    pub hosted_zone_id: String,
    pub credentials: AwsCredentials,
    pub endpoints: EndpointConfig,
    pub request_timeout: Duration,
    pub access: AccessConfig,
}

/// Default per-call timeout for STS and Route53 requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl CliConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).with_context(|| format!("missing required environment variable {key}"))
        };

        let mut access = AccessConfig::default();
        if let Some(v) = get("DNS_ACCESS_MAX_RETRIES") {
            access.max_retries = v
                .trim()
                .parse()
                .with_context(|| format!("DNS_ACCESS_MAX_RETRIES is not a number: {v}"))?;
        }
        if let Some(v) = get("DNS_ACCESS_RETRY_DELAY_SECS") {
            access.retry_delay_secs = v
                .trim()
                .parse()
                .with_context(|| format!("DNS_ACCESS_RETRY_DELAY_SECS is not a number: {v}"))?;
        }
        let request_timeout = match get("DNS_ACCESS_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .trim()
                    .parse()
                    .with_context(|| format!("DNS_ACCESS_TIMEOUT_SECS is not a number: {v}"))?;
                if secs == 0 {
                    bail!("DNS_ACCESS_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let endpoints = match get("AWS_REGION") {
            Some(region) => EndpointConfig::regional(region.trim()),
            None => EndpointConfig::default(),
        };

        Ok(Self {
            dns_account_id: required("DNS_ACCOUNT_ID")?,
            dns_role_name: required("DNS_ROLE_NAME")?,
            external_id: required("DNS_EXTERNAL_ID")?,
            hosted_zone_id: required("HOSTED_ZONE_ID")?,
            credentials: AwsCredentials::new(
                required("AWS_ACCESS_KEY_ID")?,
                required("AWS_SECRET_ACCESS_KEY")?,
                get("AWS_SESSION_TOKEN"),
            ),
            endpoints,
            request_timeout,
            access,
        })
    }
}
