//! 跨账号访问建立服务（公开入口）

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use dns_access_broker_provider::{CrossAccountApi, Session};

use crate::error::{CoreResult, Diagnostic};
use crate::services::{AccessVerifier, RoleAssumer};
use crate::traits::{RetrySleeper, TokioSleeper};
use crate::types::{AccessConfig, AccessResult, RoleAssumptionRequest};

/// Prefix of diagnostics produced while assuming the DNS role.
pub const ASSUME_ROLE_FAILED_PREFIX: &str = "Failed to assume DNS role: ";
/// Prefix of diagnostics produced while verifying Route53 access.
pub const VERIFY_ACCESS_FAILED_PREFIX: &str = "Failed to verify Route53 access: ";

/// Sequences role assumption and access verification.
///
/// Holds only the API handle and immutable configuration, so one instance can
/// serve concurrent invocations; each invocation owns its own request,
/// credentials and session. Retries are delegated entirely to [`RoleAssumer`].
pub struct AccessSetupService {
    assumer: RoleAssumer,
    verifier: AccessVerifier,
}

impl AccessSetupService {
    /// 创建服务实例（配置先校验）
    pub fn new(api: Arc<dyn CrossAccountApi>, config: AccessConfig) -> CoreResult<Self> {
        Self::with_sleeper(api, config, Arc::new(TokioSleeper))
    }

    /// 创建服务实例，使用自定义重试等待实现
    pub fn with_sleeper(
        api: Arc<dyn CrossAccountApi>,
        config: AccessConfig,
        sleeper: Arc<dyn RetrySleeper>,
    ) -> CoreResult<Self> {
        config.validate()?;
        let verifier = AccessVerifier::new(api.clone(), config.max_zone_probe_items);
        let assumer = RoleAssumer::with_sleeper(api, config, sleeper);
        Ok(Self { assumer, verifier })
    }

    /// 当前配置
    pub fn config(&self) -> &AccessConfig {
        self.assumer.config()
    }

    /// Obtains and verifies a Route53 session in the DNS account.
    pub async fn setup_access(
        &self,
        dns_account_id: &str,
        dns_role_name: &str,
        external_id: &str,
        hosted_zone_id: &str,
    ) -> AccessResult {
        self.setup_access_with_cancel(
            dns_account_id,
            dns_role_name,
            external_id,
            hosted_zone_id,
            &CancellationToken::new(),
        )
        .await
    }

    /// Like [`setup_access`](Self::setup_access), abortable through `cancel`
    /// while a retry delay is pending.
    pub async fn setup_access_with_cancel(
        &self,
        dns_account_id: &str,
        dns_role_name: &str,
        external_id: &str,
        hosted_zone_id: &str,
        cancel: &CancellationToken,
    ) -> AccessResult {
        match self
            .run(dns_account_id, dns_role_name, external_id, hosted_zone_id, cancel)
            .await
        {
            Ok(session) => AccessResult::granted(session),
            Err(diagnostic) => AccessResult::failed(diagnostic),
        }
    }

    async fn run(
        &self,
        dns_account_id: &str,
        dns_role_name: &str,
        external_id: &str,
        hosted_zone_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Session, Diagnostic> {
        // Step 1: assume role
        let request = RoleAssumptionRequest::new(dns_account_id, dns_role_name, external_id)
            .map_err(|e| Diagnostic::from(e).prefixed(ASSUME_ROLE_FAILED_PREFIX))?;

        let session = self
            .assumer
            .assume_role(&request, cancel)
            .await
            .map_err(|d| d.prefixed(ASSUME_ROLE_FAILED_PREFIX))?;

        // Step 2: verify access
        self.verifier
            .verify_access(Some(&session), hosted_zone_id)
            .await
            .map_err(|d| d.prefixed(VERIFY_ACCESS_FAILED_PREFIX))?;

        log::debug!(
            "Route53 access verified for {} on zone {hosted_zone_id}",
            request.role_arn()
        );
        Ok(session)
    }
}
