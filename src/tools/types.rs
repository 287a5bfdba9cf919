//! Core tool types.
//!
//! Defines the [`Tool`] trait that all tools implement and [`ToolResult`]
//! for capturing bounded execution output.

use async_trait::async_trait;

use crate::error::SiftError;

/// Default maximum output size (100 KB).
pub const DEFAULT_MAX_BYTES: usize = 100 * 1024;

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Human-readable output (bounded).
    pub output: String,
    /// Error message if the tool execution failed.
    pub error: Option<String>,
    /// Whether the output was truncated to fit within max_bytes.
    pub truncated: bool,
    /// Machine-readable payload for hosts that render results themselves.
    pub structured_data: Option<serde_json::Value>,
}

impl ToolResult {
    /// Create a successful tool result.
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
            error: None,
            truncated: false,
            structured_data: None,
        }
    }

    /// Create a failed tool result with an error message.
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error),
            truncated: false,
            structured_data: None,
        }
    }

    /// Bound `output` to `max_bytes`, marking the result truncated if it was cut.
    pub fn bounded(mut self, max_bytes: usize) -> Self {
        let (output, truncated) = truncate_output(&self.output, max_bytes);
        self.output = output;
        self.truncated = truncated;
        self
    }

    /// Attach a structured payload.
    pub fn with_structured_data(mut self, data: serde_json::Value) -> Self {
        self.structured_data = Some(data);
        self
    }
}

/// Truncate a string to at most `max_bytes`, respecting UTF-8 boundaries.
///
/// Returns `(truncated_string, was_truncated)`.
pub fn truncate_output(s: &str, max_bytes: usize) -> (String, bool) {
    if s.len() <= max_bytes {
        return (s.to_string(), false);
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    (
        format!("{}\n\n[output truncated at {max_bytes} bytes]", &s[..end]),
        true,
    )
}

/// Core trait for agent tools.
///
/// Tools are `Send + Sync` so a registry can be shared across tasks.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name (e.g. "web_search").
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's arguments.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::ToolValidation`] for bad arguments and
    /// [`SiftError::ToolFailed`] when execution itself fails.
    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, SiftError>;
}
