// src/config/mod.rs
pub mod baseline;
pub mod scenario;
pub mod simulation;

// Re-export commonly used types
pub use baseline::BaselineStatistics;
pub use scenario::{Scenario, ScenarioTable, BEST_CASE, NEUTRAL, WORST_CASE};
pub use simulation::SimulationConfig;
