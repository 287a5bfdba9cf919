//! DuckDuckGo search engine — scraper-friendly HTML endpoint.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http::{self, HttpSettings};
use scraper::Html;
use url::Url;

use super::selector;

/// DuckDuckGo HTML search engine scraper.
#[derive(Debug, Clone, Default)]
pub struct DuckDuckGoEngine {
    http: HttpSettings,
}

impl DuckDuckGoEngine {
    /// Create an engine with custom HTTP settings.
    pub fn with_http(http: HttpSettings) -> Self {
        Self { http }
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl SearchEngineTrait for DuckDuckGoEngine {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let agent = http::build_agent(&self.http);
        let response = agent
            .post("https://html.duckduckgo.com/html/")
            .set("Accept-Language", "en-US,en;q=0.9")
            .send_form(&[("q", query)])
            .map_err(|e| http::request_error("DuckDuckGo", e))?;

        let html = http::read_body("DuckDuckGo", response)?;
        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html, num_results)
    }

    fn name(&self) -> &str {
        "DuckDuckGo"
    }
}

/// Parse a DuckDuckGo HTML response into result URLs.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<String>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = selector(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )?;
    let link_sel = selector(".result__a")?;

    let mut urls = Vec::new();

    for element in document.select(&result_sel) {
        let href = match element
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(h) => h,
            None => continue,
        };

        let url = match DuckDuckGoEngine::extract_url(href) {
            Some(u) => u,
            None => continue,
        };

        urls.push(url);
        if urls.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = urls.len(), "DuckDuckGo results parsed");
    Ok(urls)
}
