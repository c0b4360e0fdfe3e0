//! `crowd-grid` — uniform cell grid over the simulation plane.
//!
//! # Design
//!
//! Agent neighborhood queries here are always "everyone within radius `r` of
//! a point", with `r` fixed per consumer (infection distance, target reach
//! radius).  For that access pattern a dense cell grid beats tree indexes:
//! build is one O(n) bucketing pass and a query touches only the cells under
//! the circle's bounding box.
//!
//! The grid is a per-step snapshot.  Consumers rebuild it from current
//! positions at the start of their update and never mutate it afterwards, so
//! a query can be over-approximate (it may return agents slightly outside
//! the radius) but never misses one inside it.  Callers that need the exact
//! set filter by true distance.

pub mod error;
pub mod grid;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GridError, GridResult};
pub use grid::CellGrid;
