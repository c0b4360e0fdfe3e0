//! Controller error type.

use crowd_dist::DistError;
use thiserror::Error;

pub type ControlResult<T> = Result<T, ControlError>;

#[derive(Debug, Error)]
pub enum ControlError {
    /// A scenario element is configured in a way the controller cannot run.
    #[error("controller configuration: {0}")]
    Config(String),

    /// An event-time distribution could not be materialized.
    #[error(transparent)]
    Distribution(#[from] DistError),
}
