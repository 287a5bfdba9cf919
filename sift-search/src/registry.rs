//! Insertion-ordered registry of known search engines.
//!
//! The registry maps [`EngineId`] to a shared engine instance. It is built
//! once and then only read; the built-in registry is a process-wide
//! singleton initialised on first access.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::engine::SearchEngineTrait;
use crate::engines::{BaiduEngine, BingEngine, DuckDuckGoEngine, GoogleEngine};
use crate::types::EngineId;

/// Identifier of the engine preferred when configuration names none.
pub const DEFAULT_ENGINE: &str = "google";

/// Ordered mapping of engine identifiers to engine instances.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    entries: Vec<(EngineId, Arc<dyn SearchEngineTrait>)>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an engine under `id`, returning the registry for chaining.
    ///
    /// Re-registering an existing identifier replaces the instance but keeps
    /// its original position.
    pub fn with_engine(
        mut self,
        id: impl Into<EngineId>,
        engine: Arc<dyn SearchEngineTrait>,
    ) -> Self {
        self.register(id, engine);
        self
    }

    /// Register an engine under `id`.
    pub fn register(&mut self, id: impl Into<EngineId>, engine: Arc<dyn SearchEngineTrait>) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = engine,
            None => self.entries.push((id, engine)),
        }
    }

    /// Look up an engine by identifier (case-insensitive).
    pub fn get(&self, id: &EngineId) -> Option<Arc<dyn SearchEngineTrait>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, engine)| Arc::clone(engine))
    }

    /// Whether `id` names a registered engine.
    pub fn contains(&self, id: &EngineId) -> bool {
        self.entries.iter().any(|(existing, _)| existing == id)
    }

    /// Registered identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &EngineId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no engines are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The process-wide registry of built-in engines.
    ///
    /// Order: google, baidu, duckduckgo, bing.
    pub fn builtin() -> Arc<EngineRegistry> {
        static BUILTIN: OnceLock<Arc<EngineRegistry>> = OnceLock::new();
        Arc::clone(BUILTIN.get_or_init(|| {
            Arc::new(
                EngineRegistry::new()
                    .with_engine("google", Arc::new(GoogleEngine::default()))
                    .with_engine("baidu", Arc::new(BaiduEngine::default()))
                    .with_engine("duckduckgo", Arc::new(DuckDuckGoEngine::default()))
                    .with_engine("bing", Arc::new(BingEngine::default())),
            )
        }))
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id.as_str()))
            .finish()
    }
}
