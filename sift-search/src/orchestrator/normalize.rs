//! Conversion of raw engine URLs into [`StructuredResult`] values.
//!
//! Normalisation is positional and deterministic: the same URL at the same
//! index always yields the same result. A URL that cannot be parsed is kept
//! with placeholder fields rather than dropped.

use url::Url;

use crate::types::{FAVICON_SERVICE, StructuredResult};

/// Domain used when a URL has no parseable authority.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Snippet used when a URL has no parseable authority.
pub const NO_DESCRIPTION: &str = "No description available";

/// Normalise one raw URL found at 0-based `index` in the engine's list.
pub fn normalize_result(index: usize, raw: &str) -> StructuredResult {
    let title = format!("Result {}", index + 1);

    match extract_domain(raw) {
        Some(domain) => StructuredResult {
            title,
            url: raw.to_string(),
            snippet: format!("Found at {domain}"),
            favicon: favicon_url(&domain),
            domain,
        },
        None => StructuredResult {
            title,
            url: raw.to_string(),
            domain: UNKNOWN_DOMAIN.to_string(),
            snippet: NO_DESCRIPTION.to_string(),
            favicon: String::new(),
        },
    }
}

/// Normalise a whole result list, preserving order.
pub fn normalize_results(raw: &[String]) -> Vec<StructuredResult> {
    raw.iter()
        .enumerate()
        .map(|(i, url)| normalize_result(i, url))
        .collect()
}

/// Favicon service URL for `domain`.
pub fn favicon_url(domain: &str) -> String {
    format!("{FAVICON_SERVICE}{domain}")
}

/// The authority of `raw` exactly as written, user info and port included.
///
/// Returns `None` if the URL does not parse or has no host.
fn extract_domain(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).ok()?;
    parsed.host_str().filter(|h| !h.is_empty())?;

    let (_, rest) = raw.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    (!authority.is_empty()).then(|| authority.to_string())
}
