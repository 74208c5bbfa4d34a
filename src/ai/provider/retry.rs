//! Retry wrapper for any [`LlmProvider`].

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::warn;

use super::{LlmProvider, LlmResponse, SharedProvider};
use crate::ai::timeout::with_timeout;
use crate::types::{AutodocError, Result};

const MIN_DELAY: Duration = Duration::from_millis(500);
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Upper bound on one retried call: every attempt timing out plus the
/// longest jittered backoff between attempts.
pub fn retry_budget(attempt_timeout: Duration, max_retries: usize) -> Duration {
    let retries = u32::try_from(max_retries).unwrap_or(u32::MAX);
    attempt_timeout
        .saturating_mul(retries.saturating_add(1))
        .saturating_add(MAX_DELAY.saturating_mul(2).saturating_mul(retries))
}

/// Retries retryable failures (rate limits, network, transient 5xx, timeouts)
/// with jittered exponential backoff. Everything else surfaces immediately.
///
/// The attempt timeout bounds each attempt separately, so a hung attempt
/// becomes a retryable [`AutodocError::Timeout`].
pub struct RetryingProvider {
    inner: SharedProvider,
    max_retries: usize,
    min_delay: Duration,
    max_delay: Duration,
    attempt_timeout: Option<Duration>,
}

impl RetryingProvider {
    pub fn new(inner: SharedProvider, max_retries: usize) -> Self {
        Self::with_delays(inner, max_retries, MIN_DELAY, MAX_DELAY)
    }

    pub fn with_delays(
        inner: SharedProvider,
        max_retries: usize,
        min_delay: Duration,
        max_delay: Duration,
    ) -> Self {
        Self {
            inner,
            max_retries,
            min_delay,
            max_delay,
            attempt_timeout: None,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    async fn attempt(&self, prompt: &str) -> Result<LlmResponse> {
        match self.attempt_timeout {
            Some(timeout) => with_timeout(timeout, self.inner.generate(prompt), "LLM request").await,
            None => self.inner.generate(prompt).await,
        }
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

#[async_trait]
impl LlmProvider for RetryingProvider {
    async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
        (|| self.attempt(prompt))
            .retry(self.backoff())
            .when(AutodocError::is_retryable)
            .notify(|err: &AutodocError, dur: Duration| {
                warn!("{} failed, retrying in {:?}: {}", self.inner.name(), dur, err);
            })
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}
