// src/analysis/runner.rs

use indexmap::IndexMap;
use rand::prelude::*;

use super::sampler::{DemandSampler, SampleSet};
use crate::config::{BaselineStatistics, SimulationConfig, ScenarioTable};
use crate::error::{Result, SimulationError};

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    }
}

#[derive(Debug, Clone)]
pub struct SimulationRunner {
    table: ScenarioTable,
    baseline: BaselineStatistics,
}

impl SimulationRunner {
    pub fn new(table: ScenarioTable, baseline: BaselineStatistics) -> Result<Self> {
        baseline.validate()?;
        Ok(Self { table, baseline })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let table = config.validate()?;
        Self::new(table, config.baseline)
    }

    pub fn table(&self) -> &ScenarioTable {
        &self.table
    }

    pub fn baseline(&self) -> &BaselineStatistics {
        &self.baseline
    }

    pub fn run_single<R: Rng + ?Sized>(
        &self,
        scenario_name: &str,
        iterations: usize,
        rng: &mut R,
    ) -> Result<SampleSet> {
        let scenario = self.table.get(scenario_name)?;
        DemandSampler::sample(scenario, &self.baseline, iterations, rng)
    }

    /// Runs every registered scenario. Each scenario samples from its own
    /// generator seeded from `rng`, in registration order.
    pub fn run_all<R: Rng + ?Sized>(
        &self,
        iterations: usize,
        rng: &mut R,
    ) -> Result<IndexMap<String, SampleSet>> {
        self.run_each(iterations, rng, |name, child| self.run_single(name, iterations, child))
    }

    pub fn run_period<R: Rng + ?Sized>(
        &self,
        scenario_name: &str,
        days: usize,
        iterations: usize,
        rng: &mut R,
    ) -> Result<SampleSet> {
        let scenario = self.table.get(scenario_name)?;
        DemandSampler::sample_period(scenario, &self.baseline, days, iterations, rng)
    }

    pub fn run_all_period<R: Rng + ?Sized>(
        &self,
        days: usize,
        iterations: usize,
        rng: &mut R,
    ) -> Result<IndexMap<String, SampleSet>> {
        if days == 0 {
            return Err(SimulationError::invalid("days must be positive"));
        }
        self.run_each(iterations, rng, |name, child| self.run_period(name, days, iterations, child))
    }

    fn run_each<R, F>(
        &self,
        iterations: usize,
        rng: &mut R,
        mut run: F,
    ) -> Result<IndexMap<String, SampleSet>>
    where
        R: Rng + ?Sized,
        F: FnMut(&str, &mut StdRng) -> Result<SampleSet>,
    {
        if iterations == 0 {
            return Err(SimulationError::invalid("iterations must be positive"));
        }

        let mut results = IndexMap::with_capacity(self.table.len());
        for name in self.table.names() {
            let mut child = StdRng::seed_from_u64(rng.gen());
            results.insert(name.to_string(), run(name, &mut child)?);
        }
        Ok(results)
    }
}

/// Mean of a period-demand sample set: the estimated total demand over the horizon.
pub fn expected_period_demand(samples: &SampleSet) -> Result<f64> {
    samples
        .mean()
        .ok_or_else(|| SimulationError::invalid("cannot estimate demand from an empty sample set"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scenario;

    fn runner() -> SimulationRunner {
        SimulationRunner::new(ScenarioTable::default(), BaselineStatistics::default()).unwrap()
    }

    #[test]
    fn run_single_unknown_scenario() {
        let err = runner().run_single("unknown_scenario", 100, &mut seeded_rng(Some(1))).unwrap_err();
        assert_eq!(err, SimulationError::not_found("unknown_scenario"));
    }

    #[test]
    fn run_single_zero_iterations() {
        let err = runner().run_single("neutral", 0, &mut seeded_rng(Some(1))).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidArgument { .. }));
    }

    #[test]
    fn run_all_keys_every_scenario() {
        let results = runner().run_all(250, &mut seeded_rng(Some(5))).unwrap();
        assert_eq!(
            results.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["best_case", "worst_case", "neutral"]
        );
        assert!(results.values().all(|s| s.len() == 250));
    }

    #[test]
    fn run_all_is_reproducible_with_seed() {
        let a = runner().run_all(100, &mut seeded_rng(Some(11))).unwrap();
        let b = runner().run_all(100, &mut seeded_rng(Some(11))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn run_all_uses_independent_streams() {
        // Two scenarios with identical parameters must still differ.
        let table = ScenarioTable::new(vec![
            Scenario::new("a", 1.0, 1.0).unwrap(),
            Scenario::new("b", 1.0, 1.0).unwrap(),
        ])
        .unwrap();
        let runner = SimulationRunner::new(table, BaselineStatistics::default()).unwrap();
        let results = runner.run_all(20, &mut seeded_rng(Some(3))).unwrap();
        assert_ne!(results["a"], results["b"]);
    }

    #[test]
    fn run_all_rejects_zero_iterations() {
        assert!(runner().run_all(0, &mut seeded_rng(None)).is_err());
    }

    #[test]
    fn period_estimate_tracks_horizon() {
        let samples = runner().run_period("neutral", 30, 2000, &mut seeded_rng(Some(8))).unwrap();
        let estimate = expected_period_demand(&samples).unwrap();
        // 30 days at mean 500 with negligible clamping.
        assert!((estimate - 15_000.0).abs() < 150.0, "got {}", estimate);
    }

    #[test]
    fn period_unknown_scenario() {
        let err = runner().run_period("nope", 7, 10, &mut seeded_rng(Some(8))).unwrap_err();
        assert!(matches!(err, SimulationError::NotFound { .. }));
    }

    #[test]
    fn from_config_rejects_bad_baseline() {
        let mut config = SimulationConfig::default();
        config.baseline.std_dev_demand = -5.0;
        assert!(SimulationRunner::from_config(&config).is_err());
    }
}
