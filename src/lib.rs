//! # sift
//!
//! Agent tool host for fallback web search.
//!
//! The search machinery lives in the `sift_search` crate; this crate wraps
//! it as a [`tools::WebSearchTool`], loads settings from a TOML
//! [`AppConfig`], and ships the `sift` command-line binary.

pub mod config;
pub mod error;
pub mod logging;
pub mod tools;

pub use config::AppConfig;
pub use error::{Result, SiftError};
pub use tools::{Tool, ToolRegistry, ToolResult, WebSearchTool};

use std::sync::Arc;

use sift_search::WebSearch;

/// Build a registry holding every tool, configured from `config`.
pub fn default_registry(config: &AppConfig) -> ToolRegistry {
    let search = Arc::new(WebSearch::with_config(config.search.clone()));
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WebSearchTool::new(search)));
    registry
}
