//! `crowd-state` — the mutable world state of a running simulation.
//!
//! # What lives here
//!
//! | Module         | Contents                                            |
//! |----------------|-----------------------------------------------------|
//! | [`pedestrian`] | Per-agent state: position, targets, groups, gait    |
//! | [`footstep`]   | Bounded footstep history with average-speed query   |
//! | [`psychology`] | `SelfCategory`, `InformationState`                  |
//! | [`group`]      | `Group` membership bookkeeping                      |
//! | [`attributes`] | Serde attribute structs for every scenario element  |
//! | [`target`]     | The `Target` scenario element                       |
//! | [`topography`] | Agent container, target registry, mutation events   |
//!
//! # Mutation events
//!
//! [`Topography`] records every pedestrian addition and removal as a
//! [`TopographyEvent`].  Models that track membership (the group model)
//! drain this queue at defined points in the step instead of being called
//! back in the middle of a mutation, so there is never a callback holding a
//! stale reference into the agent map.

pub mod attributes;
pub mod footstep;
pub mod group;
pub mod pedestrian;
pub mod psychology;
pub mod target;
pub mod topography;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use attributes::{
    AbsorberAttributes, AbsorbingAreaAttributes, AgentAttributes, SimulationAttributes,
    SirAttributes, SourceAttributes, SpawnerAttributes, TargetAttributes, WaiterAttributes,
};
pub use footstep::{Footstep, FootstepHistory};
pub use group::Group;
pub use pedestrian::Pedestrian;
pub use psychology::{InformationState, SelfCategory};
pub use target::Target;
pub use topography::{Topography, TopographyEvent};
