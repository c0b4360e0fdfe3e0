//! `crowd-core` — foundational types for the `crowd-sim` pedestrian framework.
//!
//! This crate is a dependency of every other `crowd-*` crate.  It intentionally
//! has no `crowd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`ids`]      | `AgentId`, `TargetId`, `SourceId`, `AreaId`, …  |
//! | [`geometry`] | `Point2`, `Rect`, `Shape` and planar distances  |
//! | [`time`]     | `SimClock` with explicit step length in seconds |
//! | [`rng`]      | `SimRng` (seeded, with child-stream derivation) |
//! | [`error`]    | `CoreError`, `CoreResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the data types.   |
//! |         | Required by `crowd-state` scenario documents.       |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geometry::{Point2, Rect, Shape};
pub use ids::{AgentId, AreaId, GroupId, SourceId, TargetId};
pub use rng::SimRng;
pub use time::SimClock;
