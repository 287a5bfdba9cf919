//! Tool system for agent hosts.
//!
//! A [`ToolRegistry`] holds named [`Tool`]s and exports their JSON schemas
//! for LLM API calls.
//!
//! # Tools
//!
//! - **web_search** — Search the web with ordered engine fallback

pub mod registry;
pub mod types;
pub mod web_search;

pub use registry::ToolRegistry;
pub use types::{Tool, ToolResult};
pub use web_search::WebSearchTool;
