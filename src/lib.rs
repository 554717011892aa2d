// src/lib.rs
//! Monte Carlo estimation of inventory stockout risk under scenario-adjusted
//! normal demand.

pub mod analysis;
pub mod config;
pub mod error;
pub mod file;

pub use analysis::{
    DemandSampler, ReportRequest, RiskAssessor, SampleSet, SampleSummary, ScenarioReport,
    SimulationReport, SimulationRunner,
};
pub use config::{BaselineStatistics, Scenario, ScenarioTable, SimulationConfig};
pub use error::{Result, SimulationError};
