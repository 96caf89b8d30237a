//! Execution-mode-aware cost model.
//!
//! Maps an activity's scheduled hours and role rate to a monetary cost.
//! The charge depends on the execution mode:
//!
//! | Mode | Cost |
//! |------|------|
//! | Sequential (default) | scheduled hours × rate |
//! | Parallel | nominal hours × rate (role count does not change person-time charged) |
//! | ForEach | nominal hours × rate × fan-out (each instance charged independently) |
//!
//! Cost is always non-negative; zero duration yields zero cost.

use serde::{Deserialize, Serialize};

use crate::models::ExecutionMode;

/// Fallback hourly rate applied when a role's rate is unset.
///
/// A configuration default, reproduced as a fixed value so cost figures stay
/// stable when role data is incomplete.
pub const DEFAULT_RATE_PER_HOUR: f64 = 105.0;

/// Pure cost function over execution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Hourly rate used when a role has no rate configured.
    pub default_rate_per_hour: f64,
}

impl CostModel {
    /// Creates a cost model with the standard default rate.
    pub fn new() -> Self {
        Self {
            default_rate_per_hour: DEFAULT_RATE_PER_HOUR,
        }
    }

    /// Overrides the fallback hourly rate.
    pub fn with_default_rate(mut self, rate_per_hour: f64) -> Self {
        self.default_rate_per_hour = rate_per_hour;
        self
    }

    /// Cost of one activity execution.
    ///
    /// * `total_hours` — mode-adjusted duration actually scheduled.
    /// * `original_total_hours` — duration before any mode adjustment.
    /// * `fan_out` — number of for-each instances (1 otherwise).
    /// * `rate_per_hour` — the executing role's resolved hourly rate.
    pub fn cost(
        &self,
        mode: ExecutionMode,
        total_hours: f64,
        original_total_hours: f64,
        fan_out: u32,
        rate_per_hour: f64,
    ) -> f64 {
        match mode {
            ExecutionMode::Parallel => original_total_hours * rate_per_hour,
            ExecutionMode::ForEach { .. } => {
                original_total_hours * rate_per_hour * f64::from(fan_out)
            }
            ExecutionMode::Sequential => total_hours * rate_per_hour,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new()
    }
}
