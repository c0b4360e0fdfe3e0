//! Simulation-level error type.

use crowd_control::ControlError;
use crowd_core::{CoreError, TargetId};
use crowd_grid::GridError;
use crowd_models::ModelError;
use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// The scenario document is inconsistent (duplicate ids, dangling
    /// references, out-of-range parameters).
    #[error("scenario: {0}")]
    Scenario(String),

    /// The scenario document could not be parsed.
    #[error("scenario json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no target {0} in the scenario")]
    UnknownTarget(TargetId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Control(#[from] ControlError),
}
