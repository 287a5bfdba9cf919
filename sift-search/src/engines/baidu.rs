//! Baidu search engine.
//!
//! Baidu links results through its own `www.baidu.com/link?url=` redirect;
//! those redirect URLs are returned as-is since they resolve to the target.

use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http::{self, HttpSettings};
use scraper::Html;

use super::{is_web_url, selector};

/// Baidu HTML search scraper.
#[derive(Debug, Clone, Default)]
pub struct BaiduEngine {
    http: HttpSettings,
}

impl BaiduEngine {
    /// Create an engine with custom HTTP settings.
    pub fn with_http(http: HttpSettings) -> Self {
        Self { http }
    }
}

impl SearchEngineTrait for BaiduEngine {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        tracing::trace!(query, "Baidu search");

        let agent = http::build_agent(&self.http);
        let rn = num_results.to_string();
        let response = agent
            .get("https://www.baidu.com/s")
            .query("wd", query)
            .query("rn", &rn)
            .set("Accept", "text/html,application/xhtml+xml")
            .call()
            .map_err(|e| http::request_error("Baidu", e))?;

        let html = http::read_body("Baidu", response)?;
        tracing::trace!(bytes = html.len(), "Baidu response received");

        parse_baidu_html(&html, num_results)
    }

    fn name(&self) -> &str {
        "Baidu"
    }
}

/// Parse a Baidu HTML response into result URLs.
fn parse_baidu_html(html: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
    let document = Html::parse_document(html);
    let link_sel = selector("div.result h3 a, div.c-container h3 a")?;

    let mut urls: Vec<String> = Vec::new();

    for link in document.select(&link_sel) {
        let href = match link.value().attr("href") {
            Some(h) if is_web_url(h) => h.to_string(),
            _ => continue,
        };
        // Baidu repeats some links across aggregated result blocks.
        if urls.contains(&href) {
            continue;
        }
        urls.push(href);
        if urls.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = urls.len(), "Baidu results parsed");
    Ok(urls)
}
