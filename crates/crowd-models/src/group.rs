//! The `GroupModel` trait — membership bookkeeping over topography changes.

use crowd_core::AgentId;
use crowd_state::{Pedestrian, Topography, TopographyEvent};

use crate::error::ModelResult;

/// Per-compartment population snapshot reported by a group model.
///
/// Models with a different compartment scheme fill in what applies and
/// leave the rest zero; the SIR model is the canonical producer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompartmentCounts {
    pub susceptible: usize,
    pub infected: usize,
    pub removed: usize,
}

impl CompartmentCounts {
    /// Total agents across all compartments.
    pub fn population(&self) -> usize {
        self.susceptible + self.infected + self.removed
    }
}

/// Pluggable group dynamics.
///
/// Implementations own a registry of groups and keep it consistent with the
/// topography through [`element_added`][Self::element_added] /
/// [`element_removed`][Self::element_removed].  The driver never calls those
/// directly: mutations are recorded by the topography as events, and the
/// provided [`drain_topography_events`][Self::drain_topography_events]
/// dispatches them at defined points of the step (at the start of
/// [`update`][Self::update], and once more after the controllers ran).
pub trait GroupModel {
    /// Called once before the first step.  The default drains any events
    /// recorded while the scenario was being built, which covers agents
    /// placed before the run starts.
    fn pre_loop(&mut self, _sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        self.drain_topography_events(topography)
    }

    /// Called once after the last step.
    fn post_loop(&mut self, _sim_time_secs: f64, _topography: &mut Topography) -> ModelResult<()> {
        Ok(())
    }

    /// One step of group dynamics at `sim_time_secs`.
    fn update(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()>;

    /// A pedestrian entered the topography and needs a group.
    fn element_added(&mut self, agent: AgentId, topography: &mut Topography) -> ModelResult<()>;

    /// A pedestrian left the topography; its membership must be released.
    /// The pedestrian no longer resolves by id, so it is passed directly.
    fn element_removed(&mut self, pedestrian: &Pedestrian) -> ModelResult<()>;

    /// Current compartment populations.
    fn compartment_counts(&self) -> CompartmentCounts;

    /// Dispatch all recorded topography mutations to the callbacks above,
    /// in occurrence order.
    fn drain_topography_events(&mut self, topography: &mut Topography) -> ModelResult<()> {
        for event in topography.take_events() {
            match event {
                TopographyEvent::PedestrianAdded(id) => self.element_added(id, topography)?,
                TopographyEvent::PedestrianRemoved(ped) => self.element_removed(&ped)?,
            }
        }
        Ok(())
    }
}
