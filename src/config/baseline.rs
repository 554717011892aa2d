// src/config/baseline.rs
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BaselineStatistics {
    pub mean_demand: f64,
    pub std_dev_demand: f64,
}

impl BaselineStatistics {
    pub fn new(mean_demand: f64, std_dev_demand: f64) -> Result<Self> {
        let baseline = Self { mean_demand, std_dev_demand };
        baseline.validate()?;
        Ok(baseline)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mean_demand.is_finite() && self.mean_demand > 0.0) {
            return Err(SimulationError::invalid(format!(
                "mean_demand must be positive, got {}",
                self.mean_demand
            )));
        }
        // A zero deviation is allowed: every draw equals the mean.
        if !(self.std_dev_demand.is_finite() && self.std_dev_demand >= 0.0) {
            return Err(SimulationError::invalid(format!(
                "std_dev_demand must be non-negative, got {}",
                self.std_dev_demand
            )));
        }
        Ok(())
    }
}

impl Default for BaselineStatistics {
    fn default() -> Self {
        Self {
            mean_demand: 500.0,
            std_dev_demand: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_historical_statistics() {
        let baseline = BaselineStatistics::default();
        assert_eq!(baseline.mean_demand, 500.0);
        assert_eq!(baseline.std_dev_demand, 50.0);
        assert!(baseline.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_statistics() {
        assert!(BaselineStatistics::new(0.0, 10.0).is_err());
        assert!(BaselineStatistics::new(100.0, -1.0).is_err());
        assert!(BaselineStatistics::new(f64::INFINITY, 1.0).is_err());
        assert!(BaselineStatistics::new(100.0, 0.0).is_ok());
    }
}
