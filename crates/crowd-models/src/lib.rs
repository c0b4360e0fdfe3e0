//! `crowd-models` — the behavioral models of the simulation.
//!
//! # What lives here
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`group`]      | `GroupModel` trait, compartment count reporting      |
//! | [`sir`]        | `SirGroupModel`: proximity infection and recovery    |
//! | [`cognition`]  | `CognitionModel` trait, name registry, two models    |
//! | [`locomotion`] | `LocomotionModel` trait, target-directed stepper     |
//! | [`error`]      | `ModelError`, `ModelResult`                          |
//!
//! # Update contract
//!
//! Model updates run single-threaded in a fixed order within each step.
//! The group model's `update` begins by draining the topography's mutation
//! events, so every agent it scans has a compartment before any transition
//! logic touches it.  Transitions performed early in a scan are visible to
//! agents processed later in the same scan; that sequential dependence is
//! part of the model, not an accident.

pub mod cognition;
pub mod error;
pub mod group;
pub mod locomotion;
pub mod sir;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cognition::{
    CognitionModel, CooperativeCognitionModel, TargetOrientedCognitionModel,
    cognition_model_from_name,
};
pub use error::{ModelError, ModelResult};
pub use group::{CompartmentCounts, GroupModel};
pub use locomotion::{LocomotionModel, TargetDirectedStepper};
pub use sir::{SirCompartment, SirGroupModel, step_probability};
