//! One pass over the ordered engine list.
//!
//! Engines are tried strictly in order. The first engine returning a
//! non-empty list wins and later engines are never called; an engine whose
//! retries are exhausted is logged and skipped.

use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::pool::BlockingPool;
use crate::registry::EngineRegistry;
use crate::types::{EngineId, SearchOutcome};

use super::normalize::normalize_results;
use super::order::engine_order_for;
use super::retry::{BackoffPolicy, invoke_with_retry};

/// Everything a trial reads; borrowed for the duration of one round.
#[derive(Debug, Clone, Copy)]
pub struct TrialContext<'a> {
    /// Known engines.
    pub registry: &'a EngineRegistry,
    /// Configuration snapshot for this request.
    pub config: &'a SearchConfig,
    /// Where blocking engine calls run.
    pub pool: &'a BlockingPool,
    /// Per-engine retry policy.
    pub policy: &'a BackoffPolicy,
    /// Caller cancellation.
    pub cancel: &'a CancellationToken,
}

/// Try each configured engine once (with per-engine retries) and normalise
/// the first non-empty result list.
///
/// Returns an empty outcome when every engine failed or came back empty,
/// including when no engine resolves at all.
///
/// # Errors
///
/// Only [`SearchError::Cancelled`].
pub async fn run_trial(
    ctx: TrialContext<'_>,
    query: &str,
    num_results: usize,
) -> Result<SearchOutcome, SearchError> {
    let order = engine_order_for(ctx.config, ctx.registry);
    if order.is_empty() {
        tracing::warn!("no configured search engine is available");
    }

    let mut failures: Vec<(EngineId, SearchError)> = Vec::new();

    for engine_id in order {
        let Some(engine) = ctx.registry.get(&engine_id) else {
            tracing::warn!(engine = %engine_id, "engine vanished from registry, skipping");
            continue;
        };

        tracing::info!("🔎 Attempting search with {}...", engine_id.display_name());

        match invoke_with_retry(ctx.pool, engine, query, num_results, ctx.policy, ctx.cancel).await
        {
            Ok(urls) if !urls.is_empty() => {
                tracing::debug!(engine = %engine_id, count = urls.len(), "engine returned results");
                let results = normalize_results(&urls);
                return Ok(SearchOutcome::from_engine(query, engine_id, results));
            }
            Ok(_) => {
                tracing::debug!(engine = %engine_id, "engine returned no results");
            }
            Err(SearchError::Cancelled) => return Err(SearchError::Cancelled),
            Err(err) => {
                tracing::error!(
                    engine = %engine_id,
                    error = %err,
                    "Search engine '{engine_id}' failed with error: {err}"
                );
                failures.push((engine_id, err));
            }
        }
    }

    if !failures.is_empty() {
        let summary: Vec<String> = failures
            .iter()
            .map(|(engine, err)| format!("{engine}: {err}"))
            .collect();
        tracing::debug!(failures = %summary.join("; "), "no engine produced results");
    }

    Ok(SearchOutcome::empty(query))
}
