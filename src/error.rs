// src/error.rs

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("scenario not found: {name}")]
    NotFound { name: String },
}

impl SimulationError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        SimulationError::InvalidArgument { reason: reason.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        SimulationError::NotFound { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
