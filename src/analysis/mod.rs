// src/analysis/mod.rs
pub mod report;
pub mod risk;
pub mod runner;
pub mod sampler;
pub mod summary;

// Re-export commonly used types
pub use report::{ReportRequest, ScenarioReport, SimulationReport};
pub use risk::RiskAssessor;
pub use runner::{expected_period_demand, seeded_rng, SimulationRunner};
pub use sampler::{DemandSampler, SampleSet};
pub use summary::{ConfidenceInterval, HistogramBin, SampleSummary};
