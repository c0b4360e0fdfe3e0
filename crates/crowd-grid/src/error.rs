//! Grid construction errors.

use thiserror::Error;

/// Errors produced by `crowd-grid`.  All of them are configuration mistakes:
/// a grid that constructed successfully cannot fail afterwards.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid bounds must have positive extent, got {width} by {height}")]
    DegenerateBounds { width: f64, height: f64 },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
}

pub type GridResult<T> = Result<T, GridError>;
