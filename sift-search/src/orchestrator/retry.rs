//! Bounded exponential backoff for a single engine.
//!
//! [`retry_with_backoff`] is the reusable primitive; [`invoke_with_retry`]
//! applies it to one engine call running on the [`BlockingPool`]. The
//! outer whole-round loop deliberately does not use this policy; it waits a
//! fixed delay between rounds.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::pool::BlockingPool;

/// Attempts per engine before its error propagates.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Exponential backoff parameters.
///
/// The delay before attempt `n` (1-based, `n >= 2`) is
/// `min(cap, base * multiplier * 2^(n-2))`; attempt 1 runs immediately.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sift_search::orchestrator::retry::BackoffPolicy;
///
/// let policy = BackoffPolicy::default();
/// assert_eq!(policy.delay_before(1), Duration::ZERO);
/// assert_eq!(policy.delay_before(2), Duration::from_secs(1));
/// assert_eq!(policy.delay_before(3), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt when `multiplier` is 1.
    pub base: Duration,
    /// Scales every computed delay.
    pub multiplier: f64,
    /// Upper bound on any single delay.
    pub cap: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base: Duration::from_secs(1),
            multiplier: 1.0,
            cap: Duration::from_secs(10),
        }
    }
}

impl BackoffPolicy {
    /// Create the default per-engine policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base delay.
    pub fn with_base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Set the multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the delay cap.
    pub fn with_cap(mut self, cap: Duration) -> Self {
        self.cap = cap;
        self
    }

    /// Attempts that will actually be made.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait before 1-based attempt `attempt`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 2).unwrap_or(i32::MAX);
        let secs = self.base.as_secs_f64() * self.multiplier * 2f64.powi(exponent);
        if !secs.is_finite() || secs >= self.cap.as_secs_f64() {
            return self.cap;
        }
        if secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(secs)
    }
}

/// Sleep for `delay` unless `cancel` fires first.
///
/// # Errors
///
/// Returns [`SearchError::Cancelled`] if the token is or becomes cancelled.
pub async fn sleep_or_cancel(delay: Duration, cancel: &CancellationToken) -> Result<(), SearchError> {
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}

/// Run `op` until it succeeds or `policy` runs out of attempts.
///
/// `op` receives the 1-based attempt number. Every error is retried except
/// [`SearchError::Cancelled`], which propagates immediately. After the last
/// attempt its error is returned.
///
/// # Errors
///
/// The final attempt's error, or [`SearchError::Cancelled`].
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &BackoffPolicy,
    cancel: &CancellationToken,
    label: &str,
    mut op: F,
) -> Result<T, SearchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    let attempts = policy.attempts();
    let mut attempt = 1u32;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(SearchError::Cancelled) => return Err(SearchError::Cancelled),
            Err(err) if attempt >= attempts => return Err(err),
            Err(err) => {
                attempt += 1;
                let delay = policy.delay_before(attempt);
                tracing::debug!(
                    engine = label,
                    attempt,
                    attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "attempt failed, backing off"
                );
                sleep_or_cancel(delay, cancel).await?;
            }
        }
    }
}

/// Call one engine on the pool, retrying with backoff.
///
/// The orchestrator stays responsive while the engine runs: cancellation
/// is observed both while waiting for the worker and during backoff.
///
/// # Errors
///
/// The engine's last error once all attempts are used, a
/// [`SearchError::Worker`] if the engine panicked on the last attempt, or
/// [`SearchError::Cancelled`].
pub async fn invoke_with_retry(
    pool: &BlockingPool,
    engine: Arc<dyn SearchEngineTrait>,
    query: &str,
    num_results: usize,
    policy: &BackoffPolicy,
    cancel: &CancellationToken,
) -> Result<Vec<String>, SearchError> {
    let label = engine.name().to_string();
    retry_with_backoff(policy, cancel, &label, |_attempt| {
        let engine = Arc::clone(&engine);
        let query = query.to_string();
        async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(SearchError::Cancelled),
                result = pool.run(move || engine.search(&query, num_results)) => result,
            }
        }
    })
    .await
}
