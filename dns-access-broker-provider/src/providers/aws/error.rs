//! AWS 错误码映射
//!
//! 参考:
//! - STS: <https://docs.aws.amazon.com/STS/latest/APIReference/API_AssumeRole.html#API_AssumeRole_Errors>
//! - Route53: <https://docs.aws.amazon.com/Route53/latest/APIReference/API_GetHostedZone.html#API_GetHostedZone_Errors>
//! - 通用错误: <https://docs.aws.amazon.com/STS/latest/APIReference/CommonErrors.html>
//!
//! 只按结构化错误码映射；消息文本不参与这里的判断。

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

/// STS 错误映射
pub(crate) struct StsErrors;

/// Route53 错误映射
pub(crate) struct Route53Errors;

/// 两个服务共用的通用错误码
fn map_common(provider: &'static str, raw: RawApiError) -> Result<ProviderError, RawApiError> {
    let Some(code) = raw.code.clone() else {
        return Err(raw);
    };

    let mapped = match code.as_str() {
        // ============ 权限拒绝 ============
        "AccessDenied" | "AccessDeniedException" | "NotAuthorizedException" => {
            ProviderError::AccessDenied {
                provider: provider.to_string(),
                raw_code: code,
                raw_message: raw.message,
            }
        }

        // ============ 令牌过期 ============
        "ExpiredToken" | "ExpiredTokenException" | "RequestExpired" => {
            ProviderError::ExpiredToken {
                provider: provider.to_string(),
                raw_code: code,
                raw_message: raw.message,
            }
        }

        // ============ 凭证/签名错误 ============
        "InvalidClientTokenId"
        | "UnrecognizedClientException"
        | "SignatureDoesNotMatch"
        | "IncompleteSignature"
        | "MissingAuthenticationToken"
        | "InvalidSignatureException" => ProviderError::InvalidCredentials {
            provider: provider.to_string(),
            raw_code: code,
            raw_message: raw.message,
        },

        // ============ 参数错误 ============
        "InvalidInput"
        | "ValidationError"
        | "InvalidParameterValue"
        | "InvalidParameterCombination"
        | "MissingParameter"
        | "MalformedPolicyDocument"
        | "PackedPolicyTooLarge" => ProviderError::InvalidParameter {
            provider: provider.to_string(),
            raw_code: code,
            raw_message: raw.message,
        },

        // ============ 限流 ============
        "Throttling" | "ThrottlingException" | "PriorRequestNotComplete" => {
            ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            }
        }

        // ============ 服务端错误 ============
        "ServiceUnavailable" | "InternalFailure" | "InternalError" => {
            ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("{code}: {}", raw.message),
            }
        }

        _ => return Err(raw),
    };

    Ok(mapped)
}

impl ProviderErrorMapper for StsErrors {
    fn provider_name(&self) -> &'static str {
        "sts"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let raw = match map_common(self.provider_name(), raw) {
            Ok(mapped) => return mapped,
            Err(raw) => raw,
        };

        match raw.code.as_deref() {
            // IAM 实体不存在（部分分区/代理会返回）
            Some("NoSuchEntity" | "NoSuchEntityException") => ProviderError::RoleNotFound {
                provider: self.provider_name().to_string(),
                role_arn: context.role_arn.unwrap_or_default(),
                raw_message: raw.message,
            },

            // ============ 其他错误 fallback ============
            // RegionDisabledException 等保留原始码，交给上层分类
            _ => self.unknown_error(raw),
        }
    }
}

impl ProviderErrorMapper for Route53Errors {
    fn provider_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let raw = match map_common(self.provider_name(), raw) {
            Ok(mapped) => return mapped,
            Err(raw) => raw,
        };

        match raw.code.as_deref() {
            // ============ Hosted zone 不存在 ============
            Some("NoSuchHostedZone") => ProviderError::HostedZoneNotFound {
                provider: self.provider_name().to_string(),
                hosted_zone_id: context.hosted_zone_id.unwrap_or_default(),
                raw_message: raw.message,
            },

            // ============ 参数错误 ============
            Some("InvalidPaginationToken" | "InvalidDomainName") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    raw_code: raw.code.unwrap_or_default(),
                    raw_message: raw.message,
                }
            }

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}
