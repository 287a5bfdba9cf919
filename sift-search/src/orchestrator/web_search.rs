//! Whole-round retry loop and the [`WebSearch`] entry point.
//!
//! A round is one [`run_trial`] over the configured engines. When a round
//! comes back empty the loop waits a fixed `retry_delay` and tries again, up
//! to `max_retries` extra rounds. Running out of rounds is not an error: the
//! caller receives an empty [`SearchOutcome`].

use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::pool::BlockingPool;
use crate::registry::EngineRegistry;
use crate::types::{SearchOutcome, SearchRequest};

use super::retry::{BackoffPolicy, sleep_or_cancel};
use super::trial::{TrialContext, run_trial};

/// Fallback web search over an ordered set of engines.
///
/// Cheap to share behind an [`Arc`]; concurrent `execute` calls only read
/// the registry and take their own configuration snapshot.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use sift_search::{SearchConfig, WebSearch};
///
/// let search = WebSearch::with_config(SearchConfig {
///     engine: Some("duckduckgo".into()),
///     fallback_engines: vec!["bing".into()],
///     ..Default::default()
/// });
/// let outcome = search.execute("rust ownership", 5).await;
/// for result in &outcome.results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct WebSearch {
    registry: Arc<EngineRegistry>,
    config: RwLock<SearchConfig>,
    policy: BackoffPolicy,
    pool: BlockingPool,
}

impl Default for WebSearch {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl WebSearch {
    /// Search over `registry` with `config`.
    pub fn new(registry: Arc<EngineRegistry>, config: SearchConfig) -> Self {
        Self::builder().registry(registry).config(config).build()
    }

    /// Search over the built-in engines with `config`.
    pub fn with_config(config: SearchConfig) -> Self {
        Self::new(EngineRegistry::builtin(), config)
    }

    /// Start a builder with default settings.
    pub fn builder() -> WebSearchBuilder {
        WebSearchBuilder::default()
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> SearchConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the configuration; later calls use the new values.
    pub fn update_config(&self, config: SearchConfig) {
        let mut guard = self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = config;
    }

    /// The engine registry this search draws from.
    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Search for `query`, never failing.
    ///
    /// A blank query or zero `num_results` yields an empty outcome without
    /// contacting any engine.
    pub async fn execute(&self, query: &str, num_results: usize) -> SearchOutcome {
        match self
            .execute_with_cancel(query, num_results, &CancellationToken::new())
            .await
        {
            Ok(outcome) => outcome,
            // The private token is never cancelled.
            Err(_) => SearchOutcome::empty(query),
        }
    }

    /// Search for `query`, aborting at the next suspension point once
    /// `cancel` fires.
    ///
    /// # Errors
    ///
    /// Only [`SearchError::Cancelled`]. Engine failures and exhausted
    /// retries produce an empty outcome instead.
    pub async fn execute_with_cancel(
        &self,
        query: &str,
        num_results: usize,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let request = match SearchRequest::new(query, num_results) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "rejecting search request");
                return Ok(SearchOutcome::empty(query));
            }
        };
        self.execute_request(&request, cancel).await
    }

    /// Run the whole-round retry loop for a validated request.
    ///
    /// # Errors
    ///
    /// Only [`SearchError::Cancelled`].
    pub async fn execute_request(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        tracing::trace!(query = %request.query, num_results = request.num_results, "web search");

        let config = self.config();
        let max_retries = config.max_retries;
        let retry_delay = config.retry_delay();
        let ctx = TrialContext {
            registry: &self.registry,
            config: &config,
            pool: &self.pool,
            policy: &self.policy,
            cancel,
        };

        let rounds = config.total_rounds();
        for round in 1..=rounds {
            let outcome = run_trial(ctx, &request.query, request.num_results).await?;
            if !outcome.is_empty() {
                return Ok(outcome);
            }

            if round == rounds {
                tracing::error!(
                    "All search engines failed after {max_retries} retries. Giving up."
                );
                return Ok(outcome);
            }

            tracing::warn!(
                "All search engines failed. Waiting {} seconds before retry {round}/{max_retries}...",
                retry_delay.as_secs()
            );
            sleep_or_cancel(retry_delay, cancel).await?;
        }

        Ok(SearchOutcome::empty(&request.query))
    }
}

/// Builder for [`WebSearch`].
#[derive(Debug, Default)]
pub struct WebSearchBuilder {
    registry: Option<Arc<EngineRegistry>>,
    config: SearchConfig,
    policy: BackoffPolicy,
    pool: Option<BlockingPool>,
}

impl WebSearchBuilder {
    /// Engines to search. Defaults to [`EngineRegistry::builtin`].
    pub fn registry(mut self, registry: Arc<EngineRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Initial configuration.
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Per-engine backoff policy.
    pub fn engine_backoff(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum concurrent blocking engine calls.
    pub fn pool_size(mut self, size: usize) -> Self {
        self.pool = Some(BlockingPool::new(size));
        self
    }

    /// Finish building.
    pub fn build(self) -> WebSearch {
        WebSearch {
            registry: self.registry.unwrap_or_else(EngineRegistry::builtin),
            config: RwLock::new(self.config),
            policy: self.policy,
            pool: self.pool.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SearchEngineTrait;
    use crate::types::EngineId;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Returns nothing for the first `empty_rounds` calls, then one URL.
    struct Eventually {
        empty_rounds: u32,
        calls: AtomicU32,
    }

    impl SearchEngineTrait for Eventually {
        fn search(&self, _query: &str, _num_results: usize) -> Result<Vec<String>, SearchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.empty_rounds {
                Ok(vec![])
            } else {
                Ok(vec!["https://found.example/".into()])
            }
        }

        fn name(&self) -> &str {
            "eventually"
        }
    }

    fn search_over(engine: Arc<Eventually>, max_retries: u32) -> WebSearch {
        WebSearch::builder()
            .registry(Arc::new(EngineRegistry::new().with_engine("only", engine)))
            .config(SearchConfig {
                engine: Some("only".into()),
                retry_delay: 0,
                max_retries,
                ..Default::default()
            })
            .engine_backoff(BackoffPolicy::new().with_base(Duration::from_millis(1)))
            .pool_size(1)
            .build()
    }

    #[tokio::test]
    async fn first_round_success_runs_once() {
        let engine = Arc::new(Eventually {
            empty_rounds: 0,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 3);
        let outcome = search.execute("q", 3).await;
        assert_eq!(outcome.engine_used, Some(EngineId::new("only")));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_rounds_are_retried_until_success() {
        let engine = Arc::new(Eventually {
            empty_rounds: 2,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 3);
        let outcome = search.execute("q", 3).await;
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries_plus_one_rounds() {
        let engine = Arc::new(Eventually {
            empty_rounds: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 2);
        let outcome = search.execute("q", 3).await;
        assert!(outcome.is_empty());
        assert!(outcome.engine_used.is_none());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_retries_runs_one_round() {
        let engine = Arc::new(Eventually {
            empty_rounds: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 0);
        assert!(search.execute("q", 3).await.is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_request_is_empty_without_engine_calls() {
        let engine = Arc::new(Eventually {
            empty_rounds: 0,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 3);
        assert!(search.execute("   ", 3).await.is_empty());
        assert!(search.execute("q", 0).await.is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancellation_during_retry_delay() {
        let engine = Arc::new(Eventually {
            empty_rounds: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 3);
        search.update_config(SearchConfig {
            engine: Some("only".into()),
            retry_delay: 3600,
            max_retries: 3,
            ..Default::default()
        });

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = search
            .execute_with_cancel("q", 3, &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_retry_delay_between_rounds_only() {
        let engine = Arc::new(Eventually {
            empty_rounds: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 2);
        search.update_config(SearchConfig {
            engine: Some("only".into()),
            retry_delay: 60,
            max_retries: 2,
            ..Default::default()
        });

        let started = tokio::time::Instant::now();
        assert!(search.execute("q", 3).await.is_empty());
        let elapsed = started.elapsed();

        // Three rounds, two waits, nothing after the last round.
        assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
        let slack = Duration::from_millis(50);
        assert!(elapsed >= Duration::from_secs(120), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(120) + slack, "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn success_after_one_retry_waits_once() {
        let engine = Arc::new(Eventually {
            empty_rounds: 1,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 3);
        search.update_config(SearchConfig {
            engine: Some("only".into()),
            retry_delay: 45,
            max_retries: 3,
            ..Default::default()
        });

        let started = tokio::time::Instant::now();
        assert!(!search.execute("q", 3).await.is_empty());
        let elapsed = started.elapsed();

        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
        assert!(elapsed >= Duration::from_secs(45), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(45) + Duration::from_millis(50));
    }

    #[tokio::test]
    async fn config_updates_apply_to_later_calls() {
        let engine = Arc::new(Eventually {
            empty_rounds: 0,
            calls: AtomicU32::new(0),
        });
        let search = search_over(engine.clone(), 0);
        search.update_config(SearchConfig {
            engine: Some("unknown".into()),
            max_retries: 0,
            retry_delay: 0,
            ..Default::default()
        });
        assert!(search.execute("q", 3).await.is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);

        search.update_config(SearchConfig {
            engine: Some("ONLY".into()),
            max_retries: 0,
            retry_delay: 0,
            ..Default::default()
        });
        assert!(!search.execute("q", 3).await.is_empty());
        assert_eq!(search.config().engine.as_deref(), Some("ONLY"));
    }
}
