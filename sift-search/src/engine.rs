//! Trait definition for pluggable search engine backends.
//!
//! Each backend (Google, Baidu, DuckDuckGo, Bing, or a test double)
//! implements [`SearchEngineTrait`]. The orchestrator only ever sees this
//! capability: a blocking call that returns result URLs in rank order.

use crate::error::SearchError;

/// A pluggable search engine backend.
///
/// Implementations perform network I/O synchronously; the orchestrator
/// always runs them on its blocking worker pool, never on the async
/// scheduler. Any error is treated as "this engine failed" and is subject
/// to retry and fallback.
///
/// All implementations must be `Send + Sync` so one instance can serve
/// concurrent requests from the shared registry.
pub trait SearchEngineTrait: Send + Sync {
    /// Perform a web search and return result URLs, best first.
    ///
    /// # Arguments
    ///
    /// * `query` — The search query (the implementation handles encoding).
    /// * `num_results` — How many URLs the caller would like. Returning
    ///   fewer is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the response cannot be
    /// parsed, or the engine is blocking requests.
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError>;

    /// Human-readable engine name used in logs.
    fn name(&self) -> &str;
}
