//! STS `AssumeRole`

use crate::error::Result;
use crate::traits::{ErrorContext, ProviderErrorMapper};
use crate::types::{AssumeRoleParams, TemporaryCredentials};
use crate::utils::datetime::parse_expiration;
use crate::utils::log_sanitizer::mask_secret;

use super::error::StsErrors;
use super::http::SignedTarget;
use super::types::AssumeRoleResponse;
use super::{AwsClient, STS_API_VERSION};

impl AwsClient {
    /// 构造 `AssumeRole` 表单参数
    pub(crate) fn assume_role_form(params: &AssumeRoleParams) -> Vec<(String, String)> {
        vec![
            ("Action".to_string(), "AssumeRole".to_string()),
            ("Version".to_string(), STS_API_VERSION.to_string()),
            ("RoleArn".to_string(), params.role_arn.clone()),
            ("RoleSessionName".to_string(), params.role_session_name.clone()),
            ("ExternalId".to_string(), params.external_id.clone()),
            (
                "DurationSeconds".to_string(),
                params.duration_seconds.to_string(),
            ),
        ]
    }

    /// 调用 STS `AssumeRole`，使用应用账号凭证签名
    pub(crate) async fn sts_assume_role(
        &self,
        params: &AssumeRoleParams,
    ) -> Result<TemporaryCredentials> {
        let target = SignedTarget {
            endpoint: &self.endpoints.sts_endpoint,
            region: &self.endpoints.region,
            service: "sts",
        };
        let ctx = ErrorContext {
            role_arn: Some(params.role_arn.clone()),
            hosted_zone_id: None,
        };

        log::debug!(
            "[sts] AssumeRole {} as {} (session {})",
            params.role_arn,
            mask_secret(&self.credentials.access_key_id),
            params.role_session_name
        );

        let response: AssumeRoleResponse = self
            .post_form(
                &StsErrors,
                &target,
                &self.credentials,
                &Self::assume_role_form(params),
                ctx,
            )
            .await?;

        let creds = response.result.credentials;
        let expires_at = parse_expiration(&creds.expiration).ok_or_else(|| {
            StsErrors.parse_error(format!("invalid Expiration '{}'", creds.expiration))
        })?;

        if let Some(user) = &response.result.assumed_role_user {
            log::debug!("[sts] Assumed {} until {expires_at}", user.arn);
        }

        Ok(TemporaryCredentials {
            access_key_id: creds.access_key_id,
            secret_access_key: creds.secret_access_key,
            session_token: creds.session_token,
            expires_at,
        })
    }
}
