use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{AssumeRoleParams, EndpointConfig, Session, TemporaryCredentials};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// AWS 错误码（如 `AccessDenied`）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 角色 ARN（用于 `RoleNotFound`）
    pub role_arn: Option<String>,
    /// Hosted zone ID（用于 `HostedZoneNotFound`）
    pub hosted_zone_id: Option<String>,
}

/// 错误映射 Trait（内部使用）
/// 各服务实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回服务标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Capability interface over the three outbound calls of the access workflow.
///
/// The production implementation is [`AwsClient`](crate::AwsClient); the access
/// workflow only ever sees this trait, so it can run against a substitute.
#[async_trait]
pub trait CrossAccountApi: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &'static str;

    /// Endpoint context bundled into every [`Session`] created from this client.
    fn endpoints(&self) -> &EndpointConfig;

    /// Exchanges the application-account identity for temporary credentials.
    async fn assume_role(&self, params: &AssumeRoleParams) -> Result<TemporaryCredentials>;

    /// Lists hosted zones with the session's credentials, requesting at most `max_items`.
    ///
    /// Only success or failure matters; the zone list is discarded.
    async fn list_hosted_zones(&self, session: &Session, max_items: u32) -> Result<()>;

    /// Fetches a single hosted zone with the session's credentials.
    async fn get_hosted_zone(&self, session: &Session, hosted_zone_id: &str) -> Result<()>;
}
