//! Role assumption with bounded retry on expired tokens

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use dns_access_broker_provider::{AssumeRoleParams, CrossAccountApi, Session};

use crate::error::Diagnostic;
use crate::services::{ErrorClassifier, Operation};
use crate::traits::{RetrySleeper, TokioSleeper};
use crate::types::{AccessConfig, RoleAssumptionRequest};

/// Process-wide discriminator for session names generated in the same instant.
static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Exchanges a role reference plus external id for a [`Session`].
///
/// Only [`ErrorCategory::TransientCredential`](crate::ErrorCategory::TransientCredential) failures are retried, up to
/// `max_retries` attempts in total, with a fixed delay before each retry.
/// Everything else is terminal on first occurrence.
pub struct RoleAssumer {
    api: Arc<dyn CrossAccountApi>,
    config: AccessConfig,
    sleeper: Arc<dyn RetrySleeper>,
}

impl RoleAssumer {
    /// Creates a role assumer that waits with `tokio::time::sleep`.
    #[must_use]
    pub fn new(api: Arc<dyn CrossAccountApi>, config: AccessConfig) -> Self {
        Self::with_sleeper(api, config, Arc::new(TokioSleeper))
    }

    /// Creates a role assumer with a custom retry delay implementation.
    #[must_use]
    pub fn with_sleeper(
        api: Arc<dyn CrossAccountApi>,
        config: AccessConfig,
        sleeper: Arc<dyn RetrySleeper>,
    ) -> Self {
        Self {
            api,
            config,
            sleeper,
        }
    }

    /// Configuration this assumer was built with.
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Assumes the role described by `request`.
    ///
    /// If `cancel` fires while a retry delay is pending, returns a
    /// [`ErrorCategory::Cancelled`](crate::ErrorCategory::Cancelled) diagnostic without further attempts.
    pub async fn assume_role(
        &self,
        request: &RoleAssumptionRequest,
        cancel: &CancellationToken,
    ) -> Result<Session, Diagnostic> {
        let max_attempts = self.config.max_retries.max(1);
        let role_arn = request.role_arn();

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return Err(ErrorClassifier::cancelled());
            }

            let params = AssumeRoleParams {
                role_arn: role_arn.clone(),
                role_session_name: self
                    .config
                    .session_name(Utc::now(), SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed)),
                external_id: request.external_id().to_string(),
                duration_seconds: self.config.duration_seconds,
            };
            log::debug!(
                "AssumeRole attempt {attempt}/{max_attempts}: {role_arn} as {}",
                params.role_session_name
            );

            let error = match self.api.assume_role(&params).await {
                Ok(credentials) => {
                    return Ok(Session::new(credentials, self.api.endpoints().clone()));
                }
                Err(e) => e,
            };

            let diagnostic = ErrorClassifier::classify(&error, Operation::RoleAssumption);
            if !diagnostic.category.is_retryable() {
                return Err(diagnostic);
            }
            if attempt == max_attempts {
                break;
            }

            let delay = self.config.retry_delay();
            log::warn!(
                "AssumeRole for {role_arn} failed with {} (attempt {attempt}/{max_attempts}), retrying in {}s",
                error.code(),
                delay.as_secs()
            );
            tokio::select! {
                () = cancel.cancelled() => return Err(ErrorClassifier::cancelled()),
                () = self.sleeper.sleep(delay) => {}
            }
        }

        Err(ErrorClassifier::retries_exhausted(max_attempts))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ErrorCategory;
    use crate::test_utils::{
        access_denied, expired_token, MockCrossAccountApi, PendingSleeper, RecordingSleeper,
    };

    fn request() -> RoleAssumptionRequest {
        RoleAssumptionRequest::new("111122223333", "certbot-dns-role", "ext-123").unwrap()
    }

    fn assumer(
        api: Arc<MockCrossAccountApi>,
        sleeper: Arc<dyn RetrySleeper>,
    ) -> RoleAssumer {
        RoleAssumer::with_sleeper(api, AccessConfig::default(), sleeper)
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let api = Arc::new(MockCrossAccountApi::new());
        let sleeper = Arc::new(RecordingSleeper::new());
        let svc = assumer(api.clone(), sleeper.clone());

        let session = svc
            .assume_role(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!session.is_expired());
        assert_eq!(api.assume_calls(), 1);
        assert!(sleeper.delays().await.is_empty());

        let params = api.assume_params().await;
        assert_eq!(
            params[0].role_arn,
            "arn:aws:iam::111122223333:role/certbot-dns-role"
        );
        assert_eq!(params[0].external_id, "ext-123");
        assert_eq!(params[0].duration_seconds, 900);
        assert!(params[0].role_session_name.starts_with("CertbotDNS-"));
    }

    #[tokio::test]
    async fn persistent_expired_token_exhausts_three_attempts() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([expired_token(), expired_token(), expired_token()])
            .await;
        let sleeper = Arc::new(RecordingSleeper::new());
        let svc = assumer(api.clone(), sleeper.clone());

        let err = svc
            .assume_role(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(api.assume_calls(), 3);
        assert_eq!(err.category, ErrorCategory::TransientCredential);
        assert_eq!(
            err.message,
            "Token expired and max retries reached (3 attempts)"
        );
    }

    #[tokio::test]
    async fn delay_precedes_each_retry() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([expired_token(), expired_token(), expired_token()])
            .await;
        let sleeper = Arc::new(RecordingSleeper::new());
        let svc = assumer(api.clone(), sleeper.clone());

        let _ = svc.assume_role(&request(), &CancellationToken::new()).await;

        // 3 attempts → 2 delays, none after the final attempt
        assert_eq!(
            sleeper.delays().await,
            vec![Duration::from_secs(5), Duration::from_secs(5)]
        );
    }

    #[tokio::test]
    async fn retries_use_fresh_session_names() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([expired_token(), expired_token(), expired_token()])
            .await;
        let svc = assumer(api.clone(), Arc::new(RecordingSleeper::new()));

        let _ = svc.assume_role(&request(), &CancellationToken::new()).await;

        let names: Vec<_> = api
            .assume_params()
            .await
            .into_iter()
            .map(|p| p.role_session_name)
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names[0] != names[1] && names[1] != names[2] && names[0] != names[2]);
    }

    #[tokio::test]
    async fn access_denied_is_not_retried() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([access_denied("sts")]).await;
        let sleeper = Arc::new(RecordingSleeper::new());
        let svc = assumer(api.clone(), sleeper.clone());

        let err = svc
            .assume_role(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(api.assume_calls(), 1);
        assert!(sleeper.delays().await.is_empty());
        assert_eq!(err.category, ErrorCategory::Authorization);
        assert!(err.message.starts_with("Access Denied: "));
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([expired_token()]).await;
        let sleeper = Arc::new(RecordingSleeper::new());
        let svc = assumer(api.clone(), sleeper.clone());

        let result = svc
            .assume_role(&request(), &CancellationToken::new())
            .await;

        assert!(result.is_ok());
        assert_eq!(api.assume_calls(), 2);
        assert_eq!(sleeper.delays().await.len(), 1);
    }

    #[tokio::test]
    async fn single_attempt_when_max_retries_is_one() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([expired_token(), expired_token()]).await;
        let config = AccessConfig {
            max_retries: 1,
            ..AccessConfig::default()
        };
        let svc = RoleAssumer::with_sleeper(api.clone(), config, Arc::new(RecordingSleeper::new()));

        let err = svc
            .assume_role(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(api.assume_calls(), 1);
        assert_eq!(err.message, "Token expired and max retries reached (1 attempts)");
    }

    #[tokio::test]
    async fn cancellation_aborts_pending_delay() {
        let api = Arc::new(MockCrossAccountApi::new());
        api.push_assume_errors([expired_token(), expired_token(), expired_token()])
            .await;
        let sleeper = Arc::new(PendingSleeper::new());
        let svc = assumer(api.clone(), sleeper.clone());
        let cancel = CancellationToken::new();
        let req = request();

        let (result, ()) = tokio::join!(svc.assume_role(&req, &cancel), async {
            sleeper.wait_until_sleeping().await;
            cancel.cancel();
        });

        let err = result.unwrap_err();
        assert_eq!(err.category, ErrorCategory::Cancelled);
        assert_eq!(api.assume_calls(), 1);
    }

    #[tokio::test]
    async fn already_cancelled_makes_no_calls() {
        let api = Arc::new(MockCrossAccountApi::new());
        let svc = assumer(api.clone(), Arc::new(RecordingSleeper::new()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = svc.assume_role(&request(), &cancel).await.unwrap_err();

        assert_eq!(err.category, ErrorCategory::Cancelled);
        assert_eq!(api.assume_calls(), 0);
    }
}
