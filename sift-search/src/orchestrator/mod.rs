//! Search orchestrator: engine ordering, per-engine retry, fallback and
//! whole-round retry.
//!
//! Control flow for one request:
//! [`web_search::WebSearch`] → [`trial::run_trial`] →
//! [`order::resolve_engine_order`] → [`retry::invoke_with_retry`] → engine.

pub mod normalize;
pub mod order;
pub mod retry;
pub mod trial;
pub mod web_search;
