//! Error types for the sift-search crate.
//!
//! Engine failures are never surfaced to callers of the orchestrator;
//! they are logged and absorbed by the retry and fallback layers. The only
//! error a caller of [`crate::WebSearch::execute_with_cancel`] can observe
//! is [`SearchError::Cancelled`].

/// Errors that can occur during web search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a search engine failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a search engine response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A search engine reported a failure of its own.
    #[error("engine error: {0}")]
    Engine(String),

    /// The blocking worker running an engine call panicked or was dropped.
    #[error("worker error: {0}")]
    Worker(String),

    /// The request itself is malformed (empty query, zero results).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The caller cancelled the search.
    #[error("search cancelled")]
    Cancelled,
}

impl SearchError {
    /// Returns true if this error came from cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Convenience type alias for sift-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
