//! Access workflow configuration

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Shortest lifetime STS accepts for `AssumeRole`.
pub const MIN_DURATION_SECONDS: i32 = 900;
/// Longest lifetime STS accepts for `AssumeRole` (role maximum session duration permitting).
pub const MAX_DURATION_SECONDS: i32 = 43_200;
/// STS limit on `RoleSessionName` length.
pub const MAX_SESSION_NAME_LEN: usize = 64;

/// Retry, lifetime and probe settings for the access workflow.
///
/// Deserializable so callers can embed it in their own configuration files;
/// every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessConfig {
    /// Total `AssumeRole` attempts for transient failures.
    pub max_retries: u32,
    /// Fixed delay before each retry, in seconds.
    pub retry_delay_secs: u64,
    /// Requested credential lifetime, in seconds.
    pub duration_seconds: i32,
    /// Prefix of the generated `RoleSessionName`.
    pub session_name_prefix: String,
    /// `maxitems` of the coarse list-zones probe.
    pub max_zone_probe_items: u32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_secs: 5,
            duration_seconds: MIN_DURATION_SECONDS,
            session_name_prefix: "CertbotDNS".to_string(),
            max_zone_probe_items: 1,
        }
    }
}

impl AccessConfig {
    /// Delay observed before each retry.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Rejects settings STS or the workflow cannot honor.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_retries == 0 {
            return Err(CoreError::ConfigError(
                "maxRetries must be at least 1".to_string(),
            ));
        }
        if !(MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&self.duration_seconds) {
            return Err(CoreError::ConfigError(format!(
                "durationSeconds must be between {MIN_DURATION_SECONDS} and {MAX_DURATION_SECONDS}, got {}",
                self.duration_seconds
            )));
        }
        if self.session_name_prefix.is_empty()
            || !self
                .session_name_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "=,.@-_".contains(c))
        {
            return Err(CoreError::ConfigError(format!(
                "sessionNamePrefix '{}' contains characters STS does not accept",
                self.session_name_prefix
            )));
        }
        if self.max_zone_probe_items == 0 {
            return Err(CoreError::ConfigError(
                "maxZoneProbeItems must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Session name `{prefix}-{unix_seconds}.{nanos}-{sequence}`, prefix cut to STS' limit.
    ///
    /// `sequence` must differ between calls made within the same instant.
    pub fn session_name(&self, now: DateTime<Utc>, sequence: u64) -> String {
        let suffix = format!(
            "-{}.{:09}-{sequence}",
            now.timestamp(),
            now.timestamp_subsec_nanos()
        );
        let keep = MAX_SESSION_NAME_LEN.saturating_sub(suffix.len());
        let prefix: String = self.session_name_prefix.chars().take(keep).collect();
        format!("{prefix}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = AccessConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(5));
        assert_eq!(config.duration_seconds, 900);
        assert_eq!(config.max_zone_probe_items, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: AccessConfig =
            serde_json::from_str(r#"{"maxRetries": 5, "sessionNamePrefix": "Acme"}"#).unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.session_name_prefix, "Acme");
        assert_eq!(config.retry_delay_secs, 5);
    }

    #[test]
    fn rejects_zero_retries() {
        let config = AccessConfig {
            max_retries: 0,
            ..AccessConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn rejects_out_of_range_duration() {
        for duration_seconds in [899, 43_201] {
            let config = AccessConfig {
                duration_seconds,
                ..AccessConfig::default()
            };
            assert!(config.validate().is_err(), "{duration_seconds}");
        }
    }

    #[test]
    fn rejects_bad_prefix() {
        let config = AccessConfig {
            session_name_prefix: "has space".to_string(),
            ..AccessConfig::default()
        };
        assert!(config.validate().is_err());
    }

    fn instant() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 42).unwrap()
    }

    #[test]
    fn session_name_format() {
        let config = AccessConfig::default();
        assert_eq!(
            config.session_name(instant(), 7),
            "CertbotDNS-1700000000.000000042-7"
        );
    }

    #[test]
    fn session_name_differs_within_the_same_instant() {
        let config = AccessConfig::default();
        assert_ne!(
            config.session_name(instant(), 1),
            config.session_name(instant(), 2)
        );
    }

    #[test]
    fn session_name_is_truncated_to_sts_limit() {
        let config = AccessConfig {
            session_name_prefix: "x".repeat(100),
            ..AccessConfig::default()
        };
        let name = config.session_name(instant(), u64::MAX);
        assert_eq!(name.len(), MAX_SESSION_NAME_LEN);
        assert!(name.ends_with("-1700000000.000000042-18446744073709551615"));
    }
}
