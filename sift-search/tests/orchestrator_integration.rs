//! Integration tests for the fallback orchestrator.
//!
//! These tests drive [`WebSearch`] end to end with scripted engines (no
//! network calls). Backoff is shrunk to milliseconds and whole-round delays
//! to zero so the suite runs fast.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sift_search::{
    BackoffPolicy, DisplayKind, EngineId, EngineRegistry, SearchConfig, SearchEngineTrait,
    SearchError, WebSearch,
};
use tokio_util::sync::CancellationToken;

/// What a scripted engine does on every call.
#[derive(Clone)]
enum Script {
    Fail,
    Empty,
    Urls(Vec<&'static str>),
}

struct ScriptedEngine {
    label: &'static str,
    script: Script,
    calls: AtomicU32,
    queries: Mutex<Vec<(String, usize)>>,
}

impl ScriptedEngine {
    fn new(label: &'static str, script: Script) -> Arc<Self> {
        Arc::new(Self {
            label,
            script,
            calls: AtomicU32::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchEngineTrait for ScriptedEngine {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.queries.lock() {
            seen.push((query.to_string(), num_results));
        }
        match &self.script {
            Script::Fail => Err(SearchError::Http(format!("{} is down", self.label))),
            Script::Empty => Ok(Vec::new()),
            Script::Urls(urls) => Ok(urls.iter().map(|u| u.to_string()).collect()),
        }
    }

    fn name(&self) -> &str {
        self.label
    }
}

fn fast_backoff() -> BackoffPolicy {
    BackoffPolicy::new()
        .with_base(Duration::from_millis(1))
        .with_cap(Duration::from_millis(5))
}

fn build(registry: EngineRegistry, config: SearchConfig) -> WebSearch {
    WebSearch::builder()
        .registry(Arc::new(registry))
        .config(config)
        .engine_backoff(fast_backoff())
        .pool_size(2)
        .build()
}

fn config(preferred: &str, fallbacks: &[&str], max_retries: u32) -> SearchConfig {
    SearchConfig {
        engine: Some(preferred.to_string()),
        fallback_engines: fallbacks.iter().map(|s| s.to_string()).collect(),
        retry_delay: 0,
        max_retries,
    }
}

#[tokio::test]
async fn preferred_fails_then_fallback_succeeds() {
    let google = ScriptedEngine::new("google", Script::Fail);
    let bing = ScriptedEngine::new(
        "bing",
        Script::Urls(vec!["https://doc.rust-lang.org/book/ch04-00.html", "https://rust-lang.org/"]),
    );
    let registry = EngineRegistry::new()
        .with_engine("google", google.clone())
        .with_engine("bing", bing.clone());

    let search = build(registry, config("google", &["bing"], 3));
    let outcome = search.execute("rust ownership", 5).await;

    assert_eq!(outcome.query, "rust ownership");
    assert_eq!(outcome.engine_used, Some(EngineId::new("bing")));
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.display_kind, DisplayKind::SearchResults);
    assert_eq!(outcome.results[0].domain, "doc.rust-lang.org");
    assert_eq!(outcome.results[1].title, "Result 2");

    // Preferred engine used all three attempts before falling through.
    assert_eq!(google.calls(), 3);
    assert_eq!(bing.calls(), 1);

    let seen = bing.queries.lock().expect("lock").clone();
    assert_eq!(seen, vec![("rust ownership".to_string(), 5)]);
}

#[tokio::test]
async fn later_engines_are_never_called_after_success() {
    let a = ScriptedEngine::new("a", Script::Empty);
    let b = ScriptedEngine::new("b", Script::Urls(vec!["https://b.example/"]));
    let c = ScriptedEngine::new("c", Script::Urls(vec!["https://c.example/"]));
    let registry = EngineRegistry::new()
        .with_engine("a", a.clone())
        .with_engine("b", b.clone())
        .with_engine("c", c.clone());

    let search = build(registry, config("a", &["b", "c"], 3));
    let outcome = search.execute("q", 10).await;

    assert_eq!(outcome.engine_used, Some(EngineId::new("b")));
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 1);
    assert_eq!(c.calls(), 0);
}

#[tokio::test]
async fn short_result_lists_count_as_success() {
    let a = ScriptedEngine::new("a", Script::Urls(vec!["https://only-one.example/"]));
    let registry = EngineRegistry::new().with_engine("a", a.clone());

    let search = build(registry, config("a", &[], 3));
    let outcome = search.execute("q", 10).await;

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(a.calls(), 1);
}

#[tokio::test]
async fn all_empty_across_all_rounds_returns_empty_outcome() {
    let a = ScriptedEngine::new("a", Script::Empty);
    let b = ScriptedEngine::new("b", Script::Fail);
    let registry = EngineRegistry::new()
        .with_engine("a", a.clone())
        .with_engine("b", b.clone());

    let search = build(registry, config("a", &["b"], 3));
    let outcome = search.execute("nothing here", 10).await;

    assert!(outcome.results.is_empty());
    assert!(outcome.engine_used.is_none());
    assert_eq!(outcome.display_kind, DisplayKind::SearchResults);

    // max_retries + 1 rounds; the failing engine retries 3 times per round.
    assert_eq!(a.calls(), 4);
    assert_eq!(b.calls(), 12);
}

#[tokio::test]
async fn engines_outside_configuration_are_ignored() {
    let a = ScriptedEngine::new("a", Script::Empty);
    let spare = ScriptedEngine::new("spare", Script::Urls(vec!["https://spare.example/"]));
    let registry = EngineRegistry::new()
        .with_engine("a", a.clone())
        .with_engine("spare", spare.clone());

    let search = build(registry, config("a", &[], 1));
    let outcome = search.execute("q", 10).await;

    assert!(outcome.is_empty());
    assert_eq!(spare.calls(), 0);
}

#[tokio::test]
async fn fallback_names_are_case_insensitive_and_deduplicated() {
    let a = ScriptedEngine::new("a", Script::Fail);
    let b = ScriptedEngine::new("b", Script::Fail);
    let registry = EngineRegistry::new()
        .with_engine("a", a.clone())
        .with_engine("b", b.clone());

    let search = build(registry, config("A", &["B", "b", "a", "zzz"], 0));
    let outcome = search.execute("q", 10).await;

    assert!(outcome.is_empty());
    assert_eq!(a.calls(), 3);
    assert_eq!(b.calls(), 3);
}

#[tokio::test]
async fn unparseable_urls_survive_normalisation() {
    let a = ScriptedEngine::new("a", Script::Urls(vec!["not a url", "https://example.com/page"]));
    let registry = EngineRegistry::new().with_engine("a", a);

    let search = build(registry, config("a", &[], 0));
    let outcome = search.execute("q", 10).await;

    assert_eq!(outcome.results.len(), 2);
    let broken = &outcome.results[0];
    assert_eq!(broken.url, "not a url");
    assert_eq!(broken.domain, "unknown");
    assert_eq!(broken.snippet, "No description available");
    assert_eq!(broken.favicon, "");

    let good = &outcome.results[1];
    assert_eq!(good.title, "Result 2");
    assert_eq!(good.snippet, "Found at example.com");
    assert_eq!(
        good.favicon,
        "https://www.google.com/s2/favicons?domain=example.com"
    );
}

#[tokio::test]
async fn outcome_serialises_for_hosts() {
    let a = ScriptedEngine::new("a", Script::Urls(vec!["https://example.com/page"]));
    let registry = EngineRegistry::new().with_engine("a", a);

    let search = build(registry, config("a", &[], 0));
    let outcome = search.execute("q", 10).await;
    let json = serde_json::to_value(&outcome).expect("serialize");

    assert_eq!(json["query"], "q");
    assert_eq!(json["engine"], "a");
    assert_eq!(json["display_type"], "search_results");
    assert_eq!(json["results"][0]["title"], "Result 1");
}

#[tokio::test]
async fn cancellation_before_start_is_reported() {
    let a = ScriptedEngine::new("a", Script::Urls(vec!["https://example.com/"]));
    let registry = EngineRegistry::new().with_engine("a", a.clone());

    let search = build(registry, config("a", &[], 0));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = search
        .execute_with_cancel("q", 10, &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(a.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_share_one_search() {
    let a = ScriptedEngine::new("a", Script::Urls(vec!["https://example.com/"]));
    let registry = EngineRegistry::new().with_engine("a", a.clone());
    let search = Arc::new(build(registry, config("a", &[], 0)));

    let mut handles = Vec::new();
    for i in 0..8 {
        let search = Arc::clone(&search);
        handles.push(tokio::spawn(async move {
            search.execute(&format!("query {i}"), 3).await
        }));
    }
    for handle in handles {
        let outcome = handle.await.expect("join");
        assert_eq!(outcome.results.len(), 1);
    }
    assert_eq!(a.calls(), 8);
}
