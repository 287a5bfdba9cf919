//! Core types for search requests, engine identifiers and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SearchError;

/// Number of results requested when the caller does not say.
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Favicon service used for successfully parsed result URLs.
pub const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain=";

/// Case-insensitive key identifying a registered search engine.
///
/// The identifier is trimmed and lowercased on construction, so
/// `EngineId::new("Google") == EngineId::new("google")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EngineId(String);

impl EngineId {
    /// Build an identifier, normalising case and surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// The normalised identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-facing name with the first letter capitalised (`"duckduckgo"` → `"Duckduckgo"`).
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for EngineId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for EngineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<EngineId> for String {
    fn from(value: EngineId) -> Self {
        value.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The query text, never blank.
    pub query: String,
    /// How many results to ask each engine for. Always positive.
    pub num_results: usize,
}

impl SearchRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] for a blank query or zero results.
    pub fn new(query: impl Into<String>, num_results: usize) -> Result<Self, SearchError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(SearchError::InvalidRequest("query must not be empty".into()));
        }
        if num_results == 0 {
            return Err(SearchError::InvalidRequest(
                "num_results must be greater than 0".into(),
            ));
        }
        Ok(Self { query, num_results })
    }

    /// Build a request asking for [`DEFAULT_NUM_RESULTS`] results.
    ///
    /// # Errors
    ///
    /// Same as [`SearchRequest::new`].
    pub fn with_default_count(query: impl Into<String>) -> Result<Self, SearchError> {
        Self::new(query, DEFAULT_NUM_RESULTS)
    }
}

/// A single normalised search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResult {
    /// Positional title, `"Result N"` (1-based).
    pub title: String,
    /// The URL exactly as the engine returned it.
    pub url: String,
    /// Authority of the URL, or `"unknown"` when it cannot be parsed.
    pub domain: String,
    /// Short description derived from the domain.
    pub snippet: String,
    /// Favicon URL, empty when the domain is unknown.
    pub favicon: String,
}

/// Presentation hint attached to every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    /// A list of web search results.
    #[default]
    SearchResults,
}

/// Final value of a search, successful or empty.
///
/// `engine_used` is set exactly when `results` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The query that was searched.
    pub query: String,
    /// Engine that produced `results`; absent for an empty outcome.
    #[serde(rename = "engine", default, skip_serializing_if = "Option::is_none")]
    pub engine_used: Option<EngineId>,
    /// Normalised results in engine order.
    pub results: Vec<StructuredResult>,
    /// Presentation hint.
    #[serde(rename = "display_type")]
    pub display_kind: DisplayKind,
}

impl SearchOutcome {
    /// An outcome with no results and no engine.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            engine_used: None,
            results: Vec::new(),
            display_kind: DisplayKind::SearchResults,
        }
    }

    /// An outcome produced by `engine`.
    pub fn from_engine(
        query: impl Into<String>,
        engine: EngineId,
        results: Vec<StructuredResult>,
    ) -> Self {
        if results.is_empty() {
            return Self::empty(query);
        }
        Self {
            query: query.into(),
            engine_used: Some(engine),
            results,
            display_kind: DisplayKind::SearchResults,
        }
    }

    /// True when no engine produced anything.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Plain-text listing of the result URLs for chat-style hosts.
    pub fn render_text(&self) -> String {
        if self.results.is_empty() {
            return format!("No search results found for '{}'.", self.query);
        }
        let lines: Vec<String> = self
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}", i + 1, r.url))
            .collect();
        format!("Search results for '{}':\n{}", self.query, lines.join("\n"))
    }
}
