//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dns_access_broker_provider::{
    AssumeRoleParams, CrossAccountApi, EndpointConfig, ProviderError, Result, Session,
    TemporaryCredentials,
};
use tokio::sync::{Notify, RwLock};

use crate::traits::RetrySleeper;

// ===== Error factories =====

pub fn expired_token() -> ProviderError {
    ProviderError::ExpiredToken {
        provider: "sts".to_string(),
        raw_code: "ExpiredToken".to_string(),
        raw_message: "The security token included in the request is expired".to_string(),
    }
}

pub fn access_denied(provider: &str) -> ProviderError {
    ProviderError::AccessDenied {
        provider: provider.to_string(),
        raw_code: "AccessDenied".to_string(),
        raw_message: "User: arn:aws:iam::123456789012:user/app is not authorized to perform this action"
            .to_string(),
    }
}

pub fn zone_not_found(hosted_zone_id: &str) -> ProviderError {
    ProviderError::HostedZoneNotFound {
        provider: "route53".to_string(),
        hosted_zone_id: hosted_zone_id.to_string(),
        raw_message: format!("No hosted zone found with ID: {hosted_zone_id}"),
    }
}

// ===== Sessions =====

pub fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
    Session::new(
        TemporaryCredentials {
            access_key_id: "ASIATESTSESSION".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
            expires_at,
        },
        EndpointConfig::default(),
    )
}

pub fn test_session() -> Session {
    session_expiring_at(Utc::now() + chrono::Duration::minutes(15))
}

// ===== MockCrossAccountApi =====

pub struct MockCrossAccountApi {
    endpoints: EndpointConfig,
    /// 依次返回的 assume_role 错误，耗尽后返回成功
    assume_errors: RwLock<VecDeque<ProviderError>>,
    list_error: RwLock<Option<ProviderError>>,
    get_error: RwLock<Option<ProviderError>>,
    assume_params: RwLock<Vec<AssumeRoleParams>>,
    list_max_items: RwLock<Vec<u32>>,
    /// (hosted_zone_id, access_key_id) per get_hosted_zone call
    zone_probes: RwLock<Vec<(String, String)>>,
    assume_count: AtomicU32,
    list_count: AtomicU32,
    get_count: AtomicU32,
}

impl MockCrossAccountApi {
    pub fn new() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            assume_errors: RwLock::new(VecDeque::new()),
            list_error: RwLock::new(None),
            get_error: RwLock::new(None),
            assume_params: RwLock::new(Vec::new()),
            list_max_items: RwLock::new(Vec::new()),
            zone_probes: RwLock::new(Vec::new()),
            assume_count: AtomicU32::new(0),
            list_count: AtomicU32::new(0),
            get_count: AtomicU32::new(0),
        }
    }

    pub async fn push_assume_errors(&self, errors: impl IntoIterator<Item = ProviderError>) {
        self.assume_errors.write().await.extend(errors);
    }

    pub async fn set_list_error(&self, err: Option<ProviderError>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_get_error(&self, err: Option<ProviderError>) {
        *self.get_error.write().await = err;
    }

    pub fn assume_calls(&self) -> u32 {
        self.assume_count.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> u32 {
        self.list_count.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> u32 {
        self.get_count.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> u32 {
        self.assume_calls() + self.list_calls() + self.get_calls()
    }

    pub async fn assume_params(&self) -> Vec<AssumeRoleParams> {
        self.assume_params.read().await.clone()
    }

    pub async fn list_max_items(&self) -> Vec<u32> {
        self.list_max_items.read().await.clone()
    }

    pub async fn zone_probes(&self) -> Vec<(String, String)> {
        self.zone_probes.read().await.clone()
    }
}

#[async_trait]
impl CrossAccountApi for MockCrossAccountApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    async fn assume_role(&self, params: &AssumeRoleParams) -> Result<TemporaryCredentials> {
        let n = self.assume_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.assume_params.write().await.push(params.clone());
        // 让并发调用有机会交错
        tokio::task::yield_now().await;

        if let Some(err) = self.assume_errors.write().await.pop_front() {
            return Err(err);
        }
        Ok(TemporaryCredentials {
            access_key_id: format!("ASIAMOCK{n:04}"),
            secret_access_key: format!("secret-{n}"),
            session_token: format!("token-{n}"),
            expires_at: Utc::now() + chrono::Duration::seconds(i64::from(params.duration_seconds)),
        })
    }

    async fn list_hosted_zones(&self, _session: &Session, max_items: u32) -> Result<()> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        self.list_max_items.write().await.push(max_items);
        tokio::task::yield_now().await;
        match self.list_error.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn get_hosted_zone(&self, session: &Session, hosted_zone_id: &str) -> Result<()> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        self.zone_probes.write().await.push((
            hosted_zone_id.to_string(),
            session.credentials().access_key_id.clone(),
        ));
        tokio::task::yield_now().await;
        match self.get_error.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ===== Sleepers =====

/// Records requested delays and returns immediately.
pub struct RecordingSleeper {
    delays: RwLock<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self {
            delays: RwLock::new(Vec::new()),
        }
    }

    pub async fn delays(&self) -> Vec<Duration> {
        self.delays.read().await.clone()
    }
}

#[async_trait]
impl RetrySleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.write().await.push(duration);
    }
}

/// Signals that a delay started, then never completes.
pub struct PendingSleeper {
    started: Notify,
}

impl PendingSleeper {
    pub fn new() -> Self {
        Self {
            started: Notify::new(),
        }
    }

    pub async fn wait_until_sleeping(&self) {
        self.started.notified().await;
    }
}

#[async_trait]
impl RetrySleeper for PendingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.started.notify_one();
        std::future::pending::<()>().await;
    }
}
