// src/config/simulation.rs
use serde::{Deserialize, Serialize};

use super::{BaselineStatistics, Scenario, ScenarioTable};
use crate::error::{Result, SimulationError};

pub const DEFAULT_STOCK_LEVEL: f64 = 600.0;
pub const DEFAULT_ITERATIONS: usize = 1000;
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub baseline: BaselineStatistics,
    pub scenarios: Vec<Scenario>,
    pub stock_level: f64,
    pub iterations: usize,
    pub comparison_iterations: Option<usize>,  // Falls back to DEFAULT_ITERATIONS
    pub histogram_bins: usize,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            baseline: BaselineStatistics::default(),
            scenarios: Scenario::defaults(),
            stock_level: DEFAULT_STOCK_LEVEL,
            iterations: DEFAULT_ITERATIONS,
            comparison_iterations: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Checks every field and builds the scenario table the runner needs.
    pub fn validate(&self) -> Result<ScenarioTable> {
        self.baseline.validate()?;
        if self.stock_level.is_nan() {
            return Err(SimulationError::invalid(format!(
                "stock_level must be a number, got {}",
                self.stock_level
            )));
        }
        if self.iterations == 0 {
            return Err(SimulationError::invalid("iterations must be positive"));
        }
        if self.comparison_iterations == Some(0) {
            return Err(SimulationError::invalid("comparison_iterations must be positive"));
        }
        if self.histogram_bins == 0 {
            return Err(SimulationError::invalid("histogram_bins must be positive"));
        }
        ScenarioTable::new(self.scenarios.iter().cloned())
    }

    pub fn comparison_iterations(&self) -> usize {
        self.comparison_iterations.unwrap_or(DEFAULT_ITERATIONS)
    }
}
