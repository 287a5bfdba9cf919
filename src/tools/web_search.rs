//! Web search tool backed by [`sift_search::WebSearch`].
//!
//! Engines are tried in configured order with per-engine backoff and whole
//! round retries; see the `sift_search` crate for the control flow.

use std::sync::Arc;

use async_trait::async_trait;
use sift_search::{DEFAULT_NUM_RESULTS, SearchConfig, WebSearch};

use crate::error::SiftError;

use super::types::{DEFAULT_MAX_BYTES, Tool, ToolResult};

/// Tool that searches the web through an ordered list of engines.
///
/// # Arguments (JSON)
///
/// - `query` (string, required) — the search query
/// - `num_results` (integer, optional) — how many results to ask each engine for (default 10)
pub struct WebSearchTool {
    search: Arc<WebSearch>,
    max_bytes: usize,
}

impl WebSearchTool {
    /// Wrap an existing search instance.
    pub fn new(search: Arc<WebSearch>) -> Self {
        Self {
            search,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Search the built-in engines with `config`.
    pub fn with_config(config: SearchConfig) -> Self {
        Self::new(Arc::new(WebSearch::with_config(config)))
    }

    /// The underlying search, e.g. to update its configuration.
    pub fn search(&self) -> &WebSearch {
        &self.search
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

fn parse_num_results(args: &serde_json::Value) -> Result<usize, SiftError> {
    let Some(value) = args.get("num_results") else {
        return Ok(DEFAULT_NUM_RESULTS);
    };
    if value.is_null() {
        return Ok(DEFAULT_NUM_RESULTS);
    }
    match value.as_i64() {
        Some(n) if n > 0 => usize::try_from(n)
            .map_err(|_| SiftError::ToolValidation(format!("num_results out of range: {n}"))),
        Some(n) => Err(SiftError::ToolValidation(format!(
            "num_results must be positive, got {n}"
        ))),
        None => Err(SiftError::ToolValidation(
            "num_results must be an integer".into(),
        )),
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web, falling back across several search engines. Returns result URLs with their domains."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to request (default 10)",
                    "minimum": 1,
                    "default": DEFAULT_NUM_RESULTS
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, SiftError> {
        let query = args.get("query").and_then(|v| v.as_str()).ok_or_else(|| {
            SiftError::ToolValidation("missing required argument: query".into())
        })?;

        if query.trim().is_empty() {
            return Err(SiftError::ToolValidation("query must not be empty".into()));
        }

        let num_results = parse_num_results(&args)?;

        let outcome = self.search.execute(query, num_results).await;
        let structured = serde_json::to_value(&outcome)
            .map_err(|e| SiftError::ToolFailed(format!("failed to serialize results: {e}")))?;

        Ok(ToolResult::success(outcome.render_text())
            .bounded(self.max_bytes)
            .with_structured_data(structured))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_search::{BackoffPolicy, EngineRegistry, SearchEngineTrait, SearchError};
    use std::sync::Mutex;
    use std::time::Duration;

    struct Fixed {
        urls: Vec<&'static str>,
        seen: Mutex<Vec<usize>>,
    }

    impl SearchEngineTrait for Fixed {
        fn search(&self, _query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(num_results);
            }
            Ok(self.urls.iter().map(|u| u.to_string()).collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn tool_over(urls: Vec<&'static str>) -> (WebSearchTool, Arc<Fixed>) {
        let engine = Arc::new(Fixed {
            urls,
            seen: Mutex::new(Vec::new()),
        });
        let search = WebSearch::builder()
            .registry(Arc::new(
                EngineRegistry::new().with_engine("fixed", engine.clone()),
            ))
            .config(SearchConfig {
                engine: Some("fixed".into()),
                retry_delay: 0,
                max_retries: 0,
                ..Default::default()
            })
            .engine_backoff(BackoffPolicy::new().with_base(Duration::from_millis(1)))
            .build();
        (WebSearchTool::new(Arc::new(search)), engine)
    }

    #[test]
    fn schema_requires_query() {
        let tool = WebSearchTool::default();
        let schema = tool.schema();
        let required = schema["required"].as_array().cloned().unwrap_or_default();
        assert!(required.iter().any(|v| v.as_str() == Some("query")));
        assert_eq!(schema["properties"]["num_results"]["type"], "integer");
        assert_eq!(schema["properties"]["num_results"]["default"], 10);
    }

    #[test]
    fn name_is_web_search() {
        assert_eq!(WebSearchTool::default().name(), "web_search");
    }

    #[tokio::test]
    async fn missing_query_is_validation_error() {
        let (tool, engine) = tool_over(vec!["https://example.com/"]);
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert_eq!(err.code(), "TOOL_VALIDATION");
        assert!(engine.seen.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn blank_query_is_validation_error() {
        let (tool, _) = tool_over(vec![]);
        let err = tool
            .execute(serde_json::json!({"query": "   "}))
            .await
            .unwrap_err();
        assert!(matches!(err, SiftError::ToolValidation(_)));
    }

    #[tokio::test]
    async fn non_positive_num_results_is_validation_error() {
        let (tool, _) = tool_over(vec![]);
        for bad in [serde_json::json!(0), serde_json::json!(-3), serde_json::json!("five")] {
            let err = tool
                .execute(serde_json::json!({"query": "rust", "num_results": bad}))
                .await
                .unwrap_err();
            assert_eq!(err.code(), "TOOL_VALIDATION");
        }
    }

    #[tokio::test]
    async fn default_num_results_is_ten() {
        let (tool, engine) = tool_over(vec!["https://example.com/"]);
        tool.execute(serde_json::json!({"query": "rust"}))
            .await
            .expect("search");
        assert_eq!(*engine.seen.lock().expect("lock"), vec![10]);
    }

    #[tokio::test]
    async fn results_render_and_serialize() {
        let (tool, engine) = tool_over(vec!["https://example.com/a", "https://rust-lang.org/"]);
        let result = tool
            .execute(serde_json::json!({"query": "rust", "num_results": 2}))
            .await
            .expect("search");

        assert!(result.success);
        assert_eq!(
            result.output,
            "Search results for 'rust':\n1. https://example.com/a\n2. https://rust-lang.org/"
        );
        let data = result.structured_data.expect("structured data");
        assert_eq!(data["engine"], "fixed");
        assert_eq!(data["display_type"], "search_results");
        assert_eq!(data["results"][1]["domain"], "rust-lang.org");
        assert_eq!(*engine.seen.lock().expect("lock"), vec![2]);
    }

    #[tokio::test]
    async fn no_results_is_still_success() {
        let (tool, _) = tool_over(vec![]);
        let result = tool
            .execute(serde_json::json!({"query": "nothing"}))
            .await
            .expect("search");
        assert!(result.success);
        assert_eq!(result.output, "No search results found for 'nothing'.");
        let data = result.structured_data.expect("structured data");
        assert_eq!(data["results"], serde_json::json!([]));
    }
}
