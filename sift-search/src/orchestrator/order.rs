//! Engine ordering from configuration.
//!
//! The preferred engine comes first, then the configured fallbacks in the
//! order given. Registered engines that configuration does not mention are
//! never tried.

use crate::config::SearchConfig;
use crate::registry::{DEFAULT_ENGINE, EngineRegistry};
use crate::types::EngineId;

/// Compute the ordered, duplicate-free list of engines to try.
///
/// `preferred` falls back to [`DEFAULT_ENGINE`]. Identifiers are compared
/// case-insensitively; unknown ones are skipped. An empty return value means
/// no engine is available.
pub fn resolve_engine_order(
    preferred: Option<&str>,
    fallbacks: &[String],
    registry: &EngineRegistry,
) -> Vec<EngineId> {
    let preferred = EngineId::new(preferred.unwrap_or(DEFAULT_ENGINE));
    let mut order: Vec<EngineId> = Vec::with_capacity(1 + fallbacks.len());

    if registry.contains(&preferred) {
        order.push(preferred);
    } else {
        tracing::debug!(engine = %preferred, "preferred engine is not registered");
    }

    for fallback in fallbacks.iter().map(EngineId::new) {
        if !registry.contains(&fallback) {
            tracing::debug!(engine = %fallback, "skipping unknown fallback engine");
            continue;
        }
        if !order.contains(&fallback) {
            order.push(fallback);
        }
    }

    order
}

/// [`resolve_engine_order`] applied to a configuration snapshot.
pub fn engine_order_for(config: &SearchConfig, registry: &EngineRegistry) -> Vec<EngineId> {
    resolve_engine_order(config.engine.as_deref(), &config.fallback_engines, registry)
}
