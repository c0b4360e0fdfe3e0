//! `crowd-control` — controllers for active scenario elements.
//!
//! A controller owns the run-time state of one scenario element and mutates
//! the topography once per step:
//!
//! | Controller                 | Element        | Effect per step                                 |
//! |----------------------------|----------------|-------------------------------------------------|
//! | [`SourceController`]       | source         | creates agents on its event schedule            |
//! | [`TargetController`]       | target         | admits, delays, advances, or removes arrivals   |
//! | [`AbsorbingAreaController`]| absorbing area | removes every agent touching the area           |
//!
//! Controllers find candidate agents through the shared proximity grid the
//! driver rebuilds each step; the grid may hand them agents outside the true
//! range, so every controller re-checks its own geometric predicate before
//! acting.  Removals and spawns go through the topography so the group model
//! sees them as events on its next update.

pub mod absorbing_area;
pub mod error;
pub mod source;
pub mod target;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use absorbing_area::AbsorbingAreaController;
pub use error::{ControlError, ControlResult};
pub use source::SourceController;
pub use target::{TargetController, TargetListener};
