//! Injectable delay used between role assumption attempts

use std::time::Duration;

use async_trait::async_trait;

/// Waits out the delay between retries.
///
/// Production code uses [`TokioSleeper`]; tests substitute an implementation
/// that records requested delays instead of waiting.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspends the calling flow for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`RetrySleeper`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
