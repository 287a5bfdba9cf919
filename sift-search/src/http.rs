//! Shared blocking HTTP agent with User-Agent rotation for engine requests.
//!
//! Engine calls run on the blocking worker pool, so they use [`ureq`]
//! rather than an async client.

use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::io::Read;
use std::time::Duration;

/// Default per-request timeout for engine scrapes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Upper bound on a response body read from an engine.
const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

/// Realistic browser User-Agent strings, rotated per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// HTTP settings shared by the built-in engines.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Fixed User-Agent. If `None`, one is picked from the rotation list per agent.
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

/// Build a [`ureq::Agent`] configured for search engine scraping.
pub fn build_agent(settings: &HttpSettings) -> ureq::Agent {
    let ua = match settings.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    ureq::AgentBuilder::new()
        .timeout(settings.timeout)
        .user_agent(&ua)
        .redirects(10)
        .build()
}

/// Read a response body as text, bounded to a sane size.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the body cannot be read.
pub fn read_body(engine: &str, response: ureq::Response) -> Result<String, SearchError> {
    let mut body = String::new();
    response
        .into_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| SearchError::Http(format!("{engine} response read failed: {e}")))?;
    Ok(body)
}

/// Map a [`ureq::Error`] into a [`SearchError`] tagged with the engine name.
pub fn request_error(engine: &str, err: ureq::Error) -> SearchError {
    match err {
        ureq::Error::Status(code, _) => SearchError::Http(format!("{engine} HTTP error: status {code}")),
        ureq::Error::Transport(t) => SearchError::Http(format!("{engine} request failed: {t}")),
    }
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
