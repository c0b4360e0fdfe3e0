//! `crowd-sim` — scenario documents, validation, and the step loop.
//!
//! The other crates provide the parts; this one wires a run together:
//!
//! 1. [`Scenario`] is the serializable run description.
//! 2. [`SimulationBuilder`] validates it and assembles a [`Simulation`]:
//!    topography, models, and one controller per active element, each with
//!    its own child RNG stream.
//! 3. [`Simulation::run`] executes the fixed step order until the finish
//!    time, reporting each step to a [`SimObserver`].
//!
//! Runs are deterministic: the same scenario document produces the same
//! sequence of states, step for step.

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, StepView};
pub use scenario::{InitialCompartment, ModelPlan, PlacedPedestrian, Scenario, TopographyPlan};
pub use sim::Simulation;
