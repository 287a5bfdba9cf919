//! Bounded pool for blocking engine calls.
//!
//! Engine implementations do synchronous network I/O. Each call is moved
//! onto tokio's blocking threads, gated by a semaphore so at most `size`
//! engine calls are in flight at once across all concurrent searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::error::SearchError;

/// Default number of engine calls allowed to run concurrently.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// A bounded gate in front of [`tokio::task::spawn_blocking`].
#[derive(Debug, Clone)]
pub struct BlockingPool {
    permits: Arc<Semaphore>,
    size: usize,
    in_flight: Arc<AtomicUsize>,
}

impl Default for BlockingPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

impl BlockingPool {
    /// Create a pool admitting `size` concurrent jobs (at least one).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Maximum number of concurrently running jobs.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Jobs currently queued or running.
    #[cfg(test)]
    pub(crate) fn queue_depth(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Run `job` on a blocking thread once a slot is free.
    ///
    /// Dropping the returned future before completion releases the caller
    /// immediately; a job that already started runs to completion in the
    /// background and its result is discarded.
    ///
    /// # Errors
    ///
    /// Returns the job's own error, or [`SearchError::Worker`] if the job
    /// panicked or the pool was closed.
    pub async fn run<F, R>(&self, job: F) -> Result<R, SearchError>
    where
        F: FnOnce() -> Result<R, SearchError> + Send + 'static,
        R: Send + 'static,
    {
        let queued = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        let _depth = DepthGuard(Arc::clone(&self.in_flight));
        tracing::trace!(queued, threads = self.size, "blocking job queued");

        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| SearchError::Worker(format!("pool closed: {e}")))?;

        let start = Instant::now();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        });

        let result = handle.await.map_err(|e| {
            if e.is_panic() {
                SearchError::Worker(format!("engine task panicked: {}", panic_reason(e)))
            } else {
                SearchError::Worker(format!("engine task aborted: {e}"))
            }
        })?;

        tracing::trace!(
            latency_ms = start.elapsed().as_millis() as u64,
            "blocking job finished"
        );
        result
    }
}

/// Decrements the in-flight counter when the caller stops waiting.
struct DepthGuard(Arc<AtomicUsize>);

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

fn panic_reason(err: tokio::task::JoinError) -> String {
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
