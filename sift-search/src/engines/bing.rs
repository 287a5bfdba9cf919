//! Bing search engine — Microsoft's index, a different view from Google.

use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http::{self, HttpSettings};
use scraper::Html;

use super::{is_web_url, selector};

/// Bing HTML search scraper.
#[derive(Debug, Clone, Default)]
pub struct BingEngine {
    http: HttpSettings,
}

impl BingEngine {
    /// Create an engine with custom HTTP settings.
    pub fn with_http(http: HttpSettings) -> Self {
        Self { http }
    }
}

impl SearchEngineTrait for BingEngine {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        tracing::trace!(query, "Bing search");

        let agent = http::build_agent(&self.http);
        let count = num_results.to_string();
        let response = agent
            .get("https://www.bing.com/search")
            .query("q", query)
            .query("setlang", "en")
            .query("count", &count)
            .set("Accept", "text/html,application/xhtml+xml")
            .set("Accept-Language", "en-US,en;q=0.9")
            .call()
            .map_err(|e| http::request_error("Bing", e))?;

        let html = http::read_body("Bing", response)?;
        tracing::trace!(bytes = html.len(), "Bing response received");

        parse_bing_html(&html, num_results)
    }

    fn name(&self) -> &str {
        "Bing"
    }
}

/// Parse a Bing HTML response into result URLs.
fn parse_bing_html(html: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
    let document = Html::parse_document(html);

    // Organic results live in li.b_algo; the title link is h2 > a.
    let result_sel = selector("li.b_algo")?;
    let link_sel = selector("h2 a")?;

    let mut urls = Vec::new();

    for element in document.select(&result_sel) {
        let href = element
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"));

        match href {
            Some(h) if is_web_url(h) => urls.push(h.to_string()),
            _ => continue,
        }

        if urls.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = urls.len(), "Bing results parsed");
    Ok(urls)
}
