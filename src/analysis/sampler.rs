// src/analysis/sampler.rs

use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::{BaselineStatistics, Scenario};
use crate::error::{Result, SimulationError};

/// Demand observations in draw order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleSet {
    values: Vec<f64>,
}

impl SampleSet {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }
}

impl From<Vec<f64>> for SampleSet {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl AsRef<[f64]> for SampleSet {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

pub struct DemandSampler;

impl DemandSampler {
    /// Mean and standard deviation of the scenario-adjusted demand distribution.
    pub fn scaled_parameters(scenario: &Scenario, baseline: &BaselineStatistics) -> Result<(f64, f64)> {
        scenario.validate()?;
        baseline.validate()?;
        Ok((
            baseline.mean_demand * scenario.demand_growth,
            baseline.std_dev_demand * scenario.economic_shift,
        ))
    }

    fn distribution(scenario: &Scenario, baseline: &BaselineStatistics) -> Result<Normal<f64>> {
        let (mean, std_dev) = Self::scaled_parameters(scenario, baseline)?;
        Normal::new(mean, std_dev).map_err(|e| {
            SimulationError::invalid(format!(
                "cannot build demand distribution for '{}': {}",
                scenario.name, e
            ))
        })
    }

    /// Draws `iterations` independent demand samples for one scenario.
    pub fn sample<R: Rng + ?Sized>(
        scenario: &Scenario,
        baseline: &BaselineStatistics,
        iterations: usize,
        rng: &mut R,
    ) -> Result<SampleSet> {
        if iterations == 0 {
            return Err(SimulationError::invalid("iterations must be positive"));
        }
        let normal = Self::distribution(scenario, baseline)?;

        let mut values = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            values.push(normal.sample(rng));
        }
        Ok(SampleSet::from_values(values))
    }

    /// Draws `iterations` totals of `days` daily demands. Each daily draw is
    /// clamped at zero before summing, so every total is non-negative.
    pub fn sample_period<R: Rng + ?Sized>(
        scenario: &Scenario,
        baseline: &BaselineStatistics,
        days: usize,
        iterations: usize,
        rng: &mut R,
    ) -> Result<SampleSet> {
        if days == 0 {
            return Err(SimulationError::invalid("days must be positive"));
        }
        if iterations == 0 {
            return Err(SimulationError::invalid("iterations must be positive"));
        }
        let normal = Self::distribution(scenario, baseline)?;

        let mut values = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let total: f64 = (0..days).map(|_| normal.sample(rng).max(0.0)).sum();
            values.push(total);
        }
        Ok(SampleSet::from_values(values))
    }
}
