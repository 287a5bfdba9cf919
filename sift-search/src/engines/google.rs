//! Google search engine — best results but aggressive bot detection.
//!
//! The no-JavaScript results page wraps organic links as
//! `/url?q=<target>&sa=...`; newer layouts link directly from `div.g`.
//! Both shapes are accepted.

use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http::{self, HttpSettings};
use scraper::Html;
use url::Url;

use super::{is_web_url, selector};

/// Google HTML search scraper.
#[derive(Debug, Clone, Default)]
pub struct GoogleEngine {
    http: HttpSettings,
}

impl GoogleEngine {
    /// Create an engine with custom HTTP settings.
    pub fn with_http(http: HttpSettings) -> Self {
        Self { http }
    }

    /// Resolve a result href to the target URL.
    fn extract_url(href: &str) -> Option<String> {
        if let Some(rest) = href.strip_prefix("/url?") {
            let wrapped = Url::parse(&format!("https://www.google.com/url?{rest}")).ok()?;
            return wrapped
                .query_pairs()
                .find(|(key, _)| key == "q" || key == "url")
                .map(|(_, value)| value.into_owned())
                .filter(|u| is_web_url(u));
        }
        if is_web_url(href) && !is_google_internal(href) {
            return Some(href.to_string());
        }
        None
    }
}

fn is_google_internal(href: &str) -> bool {
    Url::parse(href)
        .ok()
        .and_then(|u| {
            u.host_str()
                .map(|h| h == "google.com" || h.ends_with(".google.com"))
        })
        .unwrap_or(false)
}

impl SearchEngineTrait for GoogleEngine {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        tracing::trace!(query, "Google search");

        let agent = http::build_agent(&self.http);
        let num = num_results.to_string();
        let response = agent
            .get("https://www.google.com/search")
            .query("q", query)
            .query("num", &num)
            .query("hl", "en")
            .set("Accept", "text/html,application/xhtml+xml")
            .set("Accept-Language", "en-US,en;q=0.9")
            .call()
            .map_err(|e| http::request_error("Google", e))?;

        let html = http::read_body("Google", response)?;
        tracing::trace!(bytes = html.len(), "Google response received");

        parse_google_html(&html, num_results)
    }

    fn name(&self) -> &str {
        "Google"
    }
}

/// Parse a Google HTML response into result URLs, dropping repeats.
fn parse_google_html(html: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
    let document = Html::parse_document(html);
    let link_sel = selector("div.g a[href], a[href^='/url?']")?;

    let mut urls: Vec<String> = Vec::new();

    for link in document.select(&link_sel) {
        let Some(url) = link.value().attr("href").and_then(GoogleEngine::extract_url) else {
            continue;
        };
        if urls.contains(&url) {
            continue;
        }
        urls.push(url);
        if urls.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = urls.len(), "Google results parsed");
    Ok(urls)
}
