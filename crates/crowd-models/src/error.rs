//! Model error type.

use crowd_core::AgentId;
use crowd_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("agent {0} not found in topography")]
    AgentNotFound(AgentId),

    /// An agent's primary group id does not resolve in the model registry.
    /// This breaks the membership invariant, so the step aborts instead of
    /// guessing a compartment.
    #[error("agent {0} has no compartment group")]
    MissingGroup(AgentId),

    #[error("unknown cognition model '{0}'")]
    UnknownCognitionModel(String),

    #[error("model configuration error: {0}")]
    Config(String),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

pub type ModelResult<T> = Result<T, ModelError>;
