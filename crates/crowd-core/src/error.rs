//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `#[from]` or keep it wrapped as one variant.  Geometry validation is
//! the only fallible surface in this crate; everything else is plain data.

use thiserror::Error;

/// The error type for `crowd-core` validation failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("rectangle extent must be positive and finite, got {width} by {height}")]
    EmptyRect { width: f64, height: f64 },

    #[error("circle radius must be positive and finite, got {0}")]
    BadRadius(f64),

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("coordinate is not finite")]
    NonFiniteCoordinate,
}

/// Shorthand result type for `crowd-core` operations.
pub type CoreResult<T> = Result<T, CoreError>;
