// src/analysis/risk.rs

use statrs::distribution::{ContinuousCDF, Normal as StatsNormal};

use super::sampler::DemandSampler;
use crate::config::{BaselineStatistics, Scenario};
use crate::error::{Result, SimulationError};

pub struct RiskAssessor;

impl RiskAssessor {
    /// Percentage of samples strictly above `stock_level`.
    /// A sample equal to the stock level is not a stockout.
    pub fn assess<S: AsRef<[f64]> + ?Sized>(samples: &S, stock_level: f64) -> Result<f64> {
        let samples = samples.as_ref();
        if samples.is_empty() {
            return Err(SimulationError::invalid("cannot assess risk of an empty sample set"));
        }
        if stock_level.is_nan() {
            return Err(SimulationError::invalid("stock_level must be a number"));
        }

        let stockouts = samples.iter().filter(|&&demand| demand > stock_level).count();
        Ok(stockouts as f64 / samples.len() as f64 * 100.0)
    }

    /// Closed-form P(demand > stock_level) for the scenario's normal distribution, in percent.
    pub fn theoretical_risk(
        scenario: &Scenario,
        baseline: &BaselineStatistics,
        stock_level: f64,
    ) -> Result<f64> {
        if stock_level.is_nan() {
            return Err(SimulationError::invalid("stock_level must be a number"));
        }
        let (mean, std_dev) = DemandSampler::scaled_parameters(scenario, baseline)?;

        // Degenerate distribution: all mass sits on the mean.
        if std_dev == 0.0 {
            return Ok(if mean > stock_level { 100.0 } else { 0.0 });
        }

        let normal = StatsNormal::new(mean, std_dev)
            .map_err(|e| SimulationError::invalid(format!("invalid normal parameters: {}", e)))?;
        Ok((1.0 - normal.cdf(stock_level)) * 100.0)
    }
}
