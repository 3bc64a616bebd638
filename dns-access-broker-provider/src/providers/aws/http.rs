//! AWS 签名请求的发送与错误处理

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{AwsCredentials, EndpointConfig};
use crate::utils::datetime::amz_date;
use crate::utils::log_sanitizer::truncate_for_log;

use super::AwsClient;
use super::sign::{SigningRequest, SigningScope, canonical_query, canonical_uri, sign};
use super::types::ErrorResponse;

/// 表单请求的 Content-Type（STS query 协议）
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// 一次签名请求的目标
pub(crate) struct SignedTarget<'a> {
    /// 服务 base URL
    pub endpoint: &'a str,
    /// 签名 region
    pub region: &'a str,
    /// 签名 service 名称（`sts` / `route53`）
    pub service: &'a str,
}

impl AwsClient {
    // ==================== 辅助方法 ====================

    /// 统一处理 AWS 响应错误
    fn handle_response_error<M: ProviderErrorMapper>(
        mapper: &M,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        // 尝试解析结构化错误
        if let Ok(error) = quick_xml::de::from_str::<ErrorResponse>(response_text) {
            let message = error.error.message.unwrap_or_default();
            return Err(match error.error.code {
                Some(code) => mapper.map_error(RawApiError::with_code(code, message), ctx),
                None => mapper.map_error(RawApiError::new(message), ctx),
            });
        }

        // 回退到通用错误
        Err(mapper.unknown_error(RawApiError::new(format!(
            "HTTP {status}: {}",
            truncate_for_log(response_text)
        ))))
    }

    /// 构造签名所需的请求头（host / x-amz-date / x-amz-security-token）
    fn signing_headers(
        target: &SignedTarget<'_>,
        credentials: &AwsCredentials,
        timestamp: &str,
        content_type: Option<&str>,
    ) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "Host".to_string(),
                EndpointConfig::host_of(target.endpoint).to_string(),
            ),
            ("X-Amz-Date".to_string(), timestamp.to_string()),
        ];
        if let Some(token) = &credentials.session_token {
            headers.push(("X-Amz-Security-Token".to_string(), token.clone()));
        }
        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        headers
    }

    /// 签名并发送请求，返回成功响应的文本
    async fn execute_signed<M: ProviderErrorMapper>(
        &self,
        mapper: &M,
        target: &SignedTarget<'_>,
        credentials: &AwsCredentials,
        request: &SigningRequest<'_>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let now = Utc::now();
        let timestamp = amz_date(now);
        let content_type = (!request.payload.is_empty()).then_some(FORM_CONTENT_TYPE);
        let headers = Self::signing_headers(target, credentials, &timestamp, content_type);

        let signing_request = SigningRequest {
            headers: &headers,
            ..*request
        };
        let scope = SigningScope {
            region: target.region,
            service: target.service,
        };
        let authorization = sign(credentials, &scope, &signing_request, now);

        let query = canonical_query(request.query);
        let base = target.endpoint.trim_end_matches('/');
        let path = canonical_uri(request.path);
        let url = if query.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{query}")
        };

        let mut builder = match request.method {
            "POST" => self.client.post(&url).body(request.payload.to_string()),
            "GET" => self.client.get(&url),
            other => {
                return Err(ProviderError::SerializationError {
                    provider: mapper.provider_name().to_string(),
                    detail: format!("unsupported method {other}"),
                });
            }
        };
        // reqwest 根据 URL 自动设置 Host
        for (name, value) in headers.iter().filter(|(name, _)| name != "Host") {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = builder.header("Authorization", authorization);

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            builder,
            mapper.provider_name(),
            request.method,
            &url,
            self.max_retries,
        )
        .await?;

        Self::handle_response_error(mapper, status, &response_text, ctx)?;
        Ok(response_text)
    }

    // ==================== 公开 API 方法 ====================

    /// 执行 query 协议的 POST 表单请求（STS）
    pub(crate) async fn post_form<T, M>(
        &self,
        mapper: &M,
        target: &SignedTarget<'_>,
        credentials: &AwsCredentials,
        form: &[(String, String)],
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        M: ProviderErrorMapper,
    {
        let payload = canonical_query(form);
        let request = SigningRequest {
            method: "POST",
            path: "/",
            query: &[],
            headers: &[],
            payload: &payload,
        };
        let text = self
            .execute_signed(mapper, target, credentials, &request, ctx)
            .await?;
        HttpUtils::parse_xml(&text, mapper.provider_name())
    }

    /// 执行 REST 协议的 GET 请求（Route53）
    pub(crate) async fn get<T, M>(
        &self,
        mapper: &M,
        target: &SignedTarget<'_>,
        credentials: &AwsCredentials,
        path: &str,
        query: &[(String, String)],
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        M: ProviderErrorMapper,
    {
        let request = SigningRequest {
            method: "GET",
            path,
            query,
            headers: &[],
            payload: "",
        };
        let text = self
            .execute_signed(mapper, target, credentials, &request, ctx)
            .await?;
        HttpUtils::parse_xml(&text, mapper.provider_name())
    }
}
