// src/config/scenario.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

pub const BEST_CASE: &str = "best_case";
pub const WORST_CASE: &str = "worst_case";
pub const NEUTRAL: &str = "neutral";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub demand_growth: f64,   // Scales baseline mean demand
    pub economic_shift: f64,  // Scales baseline standard deviation
}

impl Scenario {
    pub fn new(name: impl Into<String>, demand_growth: f64, economic_shift: f64) -> Result<Self> {
        let scenario = Self {
            name: name.into(),
            demand_growth,
            economic_shift,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn multipliers(&self) -> (f64, f64) {
        (self.demand_growth, self.economic_shift)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SimulationError::invalid("scenario name must not be empty"));
        }
        if !(self.demand_growth.is_finite() && self.demand_growth > 0.0) {
            return Err(SimulationError::invalid(format!(
                "scenario '{}' has non-positive demand_growth {}",
                self.name, self.demand_growth
            )));
        }
        if !(self.economic_shift.is_finite() && self.economic_shift > 0.0) {
            return Err(SimulationError::invalid(format!(
                "scenario '{}' has non-positive economic_shift {}",
                self.name, self.economic_shift
            )));
        }
        Ok(())
    }

    /// The three scenarios every table starts from.
    pub fn defaults() -> Vec<Scenario> {
        vec![
            Scenario { name: BEST_CASE.to_string(), demand_growth: 1.2, economic_shift: 0.8 },
            Scenario { name: WORST_CASE.to_string(), demand_growth: 0.7, economic_shift: 1.3 },
            Scenario { name: NEUTRAL.to_string(), demand_growth: 1.0, economic_shift: 1.0 },
        ]
    }
}

/// Immutable, name-keyed set of validated scenarios in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTable {
    scenarios: IndexMap<String, Scenario>,
}

impl ScenarioTable {
    pub fn new(scenarios: impl IntoIterator<Item = Scenario>) -> Result<Self> {
        let mut table = IndexMap::new();
        for scenario in scenarios {
            scenario.validate()?;
            if table.contains_key(&scenario.name) {
                return Err(SimulationError::invalid(format!(
                    "duplicate scenario name '{}'",
                    scenario.name
                )));
            }
            table.insert(scenario.name.clone(), scenario);
        }
        Ok(Self { scenarios: table })
    }

    /// Returns a new table with `scenario` registered after the existing ones.
    pub fn with_scenario(&self, scenario: Scenario) -> Result<Self> {
        Self::new(self.scenarios.values().cloned().chain(std::iter::once(scenario)))
    }

    pub fn get(&self, name: &str) -> Result<&Scenario> {
        self.scenarios
            .get(name)
            .ok_or_else(|| SimulationError::not_found(name))
    }

    pub fn multipliers(&self, name: &str) -> Result<(f64, f64)> {
        self.get(name).map(Scenario::multipliers)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenarios.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self {
            scenarios: Scenario::defaults()
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }
}
