//! # sift-search
//!
//! Web search with ordered engine fallback.
//!
//! A search tries a preferred engine, then configured fallbacks, stopping at
//! the first engine that returns anything. Each engine gets a few attempts
//! with exponential backoff; if every engine in a round comes back empty the
//! whole round is repeated after a fixed delay.
//!
//! ## Design
//!
//! - Engines implement [`SearchEngineTrait`], a blocking `search(query, n)`
//!   returning result URLs. Calls run on a bounded blocking pool so the
//!   async scheduler stays free.
//! - Built-in engines scrape Google, Baidu, DuckDuckGo and Bing HTML pages.
//! - Results are normalised into [`StructuredResult`] values positionally.
//! - Ordinary failure is never an error: an empty [`SearchOutcome`] is the
//!   only failure signal. Cancellation is the one error callers may see.
//!
//! ## Security
//!
//! - No API keys or secrets
//! - Search queries are logged only at trace level

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod pool;
pub mod registry;
pub mod types;

pub use config::SearchConfig;
pub use engine::SearchEngineTrait;
pub use error::{Result, SearchError};
pub use orchestrator::retry::BackoffPolicy;
pub use orchestrator::web_search::{WebSearch, WebSearchBuilder};
pub use registry::{DEFAULT_ENGINE, EngineRegistry};
pub use types::{
    DEFAULT_NUM_RESULTS, DisplayKind, EngineId, SearchOutcome, SearchRequest, StructuredResult,
};

/// Search the built-in engines with `config`.
///
/// Convenience wrapper building a one-off [`WebSearch`]. Never fails;
/// an empty outcome means nothing was found.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = sift_search::SearchConfig::default();
/// let outcome = sift_search::search("rust programming", 10, &config).await;
/// println!("{}", outcome.render_text());
/// # }
/// ```
pub async fn search(query: &str, num_results: usize, config: &SearchConfig) -> SearchOutcome {
    WebSearch::with_config(config.clone())
        .execute(query, num_results)
        .await
}

/// Search the built-in engines with default configuration.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let outcome = sift_search::search_default("weather today").await;
/// for result in &outcome.results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # }
/// ```
pub async fn search_default(query: &str) -> SearchOutcome {
    search(query, DEFAULT_NUM_RESULTS, &SearchConfig::default()).await
}
