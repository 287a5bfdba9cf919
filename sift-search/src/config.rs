//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which engine is preferred, which engines are
//! tried after it, and how the whole round of engines is retried when every
//! engine comes back empty. Every field is optional in serialized form.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between whole-round retries, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 60;

/// Default number of whole-round retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for engine ordering and whole-round retries.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Preferred engine identifier. `None` means [`crate::registry::DEFAULT_ENGINE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Engines tried after the preferred one, in order.
    pub fallback_engines: Vec<String>,
    /// Seconds to wait before re-running a round in which every engine failed.
    pub retry_delay: u64,
    /// How many extra rounds to run after the first one comes back empty.
    pub max_retries: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: None,
            fallback_engines: Vec::new(),
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl SearchConfig {
    /// The delay between whole-round retries as a [`Duration`].
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay)
    }

    /// Total number of rounds the outer loop may run (first attempt plus retries).
    pub fn total_rounds(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
