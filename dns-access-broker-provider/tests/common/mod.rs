//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use chrono::Utc;
use dns_access_broker_provider::{AssumeRoleParams, AwsClient, AwsCredentials};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文 - 封装客户端和目标账号信息
pub struct TestContext {
    pub client: AwsClient,
    pub params: AssumeRoleParams,
    pub hosted_zone_id: String,
}

impl TestContext {
    /// 从环境变量创建测试上下文
    pub fn from_env() -> Option<Self> {
        let access_key_id = env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret_access_key = env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        let session_token = env::var("AWS_SESSION_TOKEN").ok();
        let account_id = env::var("DNS_ACCOUNT_ID").ok()?;
        let role_name = env::var("DNS_ROLE_NAME").ok()?;
        let external_id = env::var("DNS_EXTERNAL_ID").ok()?;
        let hosted_zone_id = env::var("HOSTED_ZONE_ID").ok()?;

        let client = AwsClient::builder(AwsCredentials::new(
            access_key_id,
            secret_access_key,
            session_token,
        ))
        .build()
        .ok()?;

        Some(Self {
            client,
            params: AssumeRoleParams {
                role_arn: format!("arn:aws:iam::{account_id}:role/{role_name}"),
                role_session_name: format!("IntegrationTest-{}", Utc::now().timestamp()),
                external_id,
                duration_seconds: 900,
            },
            hosted_zone_id,
        })
    }
}
