//! Search configuration handling.
//!
//! Provides a typed interface over the JSON config an AI is created with.
//! Every field has a default, so `{}` and a missing config behave the same.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Tuning knobs for the Monte-Carlo search.
///
/// # Example JSON Config
///
/// ```json
/// {"time_budget_ms": 250, "seed": 12345}
/// ```
///
/// Deterministic test config:
/// ```json
/// {"time_budget_ms": 60000, "max_iterations": 200, "seed": 7}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock ceiling for one decision, in milliseconds.
    pub time_budget_ms: u64,

    /// Hard cap on select-then-expand iterations, the root's own expansion
    /// included. At least one iteration always runs.
    ///
    /// Combined with a seed this makes a search reproducible regardless of
    /// machine speed, as long as the time budget is not hit first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,

    /// The clock is read once every this many iterations.
    pub clock_check_interval: u64,

    /// Moves a single rollout may make before it is scored as a loss.
    pub rollout_move_limit: usize,

    /// Constant under the UCB1 square root.
    pub exploration: f64,

    /// Optional RNG seed for deterministic search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 1000,
            max_iterations: None,
            clock_check_interval: 20,
            rollout_move_limit: 1000,
            exploration: 2.0,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Create a SearchConfig from an optional JSON value.
    ///
    /// Missing fields take defaults; a config that fails to deserialize
    /// falls back to the defaults entirely.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_default(),
            None => Self::default(),
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Cap the search at `n` iterations and lift the clock far enough out of
    /// the way that the cap always decides.
    pub fn with_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self.time_budget_ms = self.time_budget_ms.max(600_000);
        self
    }
}
