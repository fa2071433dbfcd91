use crate::error::RequestError;
use async_trait::async_trait;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt, so at most `max_retries + 1` calls
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// Linear backoff: the wait after attempt `attempt` (0-indexed) is `base * (attempt + 1)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(u64::from(attempt) + 1))
    }
}

/// Waits between attempts. Swapped out in tests to avoid real timers.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy<S = TokioSleeper> {
    config: RetryConfig,
    sleeper: S,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self::with_sleeper(config, TokioSleeper)
    }
}

impl<S: Sleeper> RetryPolicy<S> {
    pub fn with_sleeper(config: RetryConfig, sleeper: S) -> Self {
        Self { config, sleeper }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation` until it succeeds, fails with an error that is not worth retrying,
    /// or the retry budget runs out. The last error is returned as-is.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, RequestError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, RequestError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        info!("Request succeeded after {} attempts", attempt + 1);
                    }
                    return Ok(result);
                }
                Err(err) if err.should_retry(attempt, self.config.max_retries) => {
                    let delay = self.config.delay_for(attempt);
                    warn!(
                        "Attempt {} to {} failed (status {:?}): {}. Retrying in {:?}...",
                        attempt + 1,
                        err.url(),
                        err.status(),
                        err.message(),
                        delay
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_transient() {
                        warn!(
                            url = err.url(),
                            status = ?err.status(),
                            error = err.message(),
                            "Transient request failure after {} attempts",
                            attempt + 1
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}
