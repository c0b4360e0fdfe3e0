//! Observation hooks for the run loop.

use crowd_models::CompartmentCounts;
use crowd_state::Topography;

/// Read-only view of the simulation handed to observers.
pub struct StepView<'a> {
    /// Steps completed when this view was taken.
    pub step: u64,
    pub time_secs: f64,
    pub topography: &'a Topography,
    /// Compartment populations, when a group model runs.
    pub compartments: Option<CompartmentCounts>,
}

/// Callbacks around the run loop.  All hooks default to no-ops so an
/// observer implements only what it cares about.
pub trait SimObserver {
    /// After setup, before the first step.
    fn run_started(&mut self, _view: &StepView<'_>) {}

    /// Before each step, with the state the step will start from.
    fn step_started(&mut self, _view: &StepView<'_>) {}

    /// After every completed step.
    fn step_finished(&mut self, _view: &StepView<'_>) {}

    /// After the last step.
    fn run_finished(&mut self, _view: &StepView<'_>) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
