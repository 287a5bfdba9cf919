//! Built-in search engine implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchEngineTrait`]
//! that scrapes a specific engine's HTML results page and returns result URLs.

pub mod baidu;
pub mod bing;
pub mod duckduckgo;
pub mod google;

pub use baidu::BaiduEngine;
pub use bing::BingEngine;
pub use duckduckgo::DuckDuckGoEngine;
pub use google::GoogleEngine;

use crate::error::SearchError;
use scraper::Selector;

/// Compile a CSS selector, mapping failure to a parse error.
pub(crate) fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

/// True for absolute `http(s)` links.
pub(crate) fn is_web_url(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}
