//! The agent container and target registry.

use std::collections::{BTreeMap, VecDeque};

use crowd_core::{AgentId, Point2, Rect, TargetId};

use crate::attributes::AgentAttributes;
use crate::pedestrian::Pedestrian;
use crate::target::Target;

/// A recorded topography mutation, drained by the group model.
///
/// Removal carries the pedestrian by value: its group membership must remain
/// readable after the agent has left the map.  Addition carries only the id;
/// the pedestrian is live and gets its group assigned in place.
#[derive(Debug)]
pub enum TopographyEvent {
    PedestrianAdded(AgentId),
    PedestrianRemoved(Pedestrian),
}

/// World state: bounded plane, pedestrians, targets.
///
/// Pedestrians live in an ordered map keyed by id.  Ids are assigned as a
/// dense ascending sequence and never reused, so iteration order is creation
/// order and stays deterministic across runs.
pub struct Topography {
    bounds: Rect,
    agent_attributes: AgentAttributes,
    pedestrians: BTreeMap<AgentId, Pedestrian>,
    targets: BTreeMap<TargetId, Target>,
    next_agent_id: u32,
    events: VecDeque<TopographyEvent>,
}

impl Topography {
    pub fn new(bounds: Rect, agent_attributes: AgentAttributes) -> Self {
        Self {
            bounds,
            agent_attributes,
            pedestrians: BTreeMap::new(),
            targets: BTreeMap::new(),
            next_agent_id: 0,
            events: VecDeque::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn agent_attributes(&self) -> &AgentAttributes {
        &self.agent_attributes
    }

    // ── Targets ───────────────────────────────────────────────────────────

    pub fn add_target(&mut self, target: Target) {
        self.targets.insert(target.id(), target);
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    // ── Pedestrians ───────────────────────────────────────────────────────

    /// Create a pedestrian at `position` with the default agent attributes.
    ///
    /// The new agent starts with an empty target queue; callers configure it
    /// through [`Topography::pedestrian_mut`].  The addition is recorded as
    /// an event for the group model.
    pub fn spawn_pedestrian(&mut self, position: Point2) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        let ped = Pedestrian::new(id, position, &self.agent_attributes);
        self.pedestrians.insert(id, ped);
        self.events.push_back(TopographyEvent::PedestrianAdded(id));
        id
    }

    /// Remove a pedestrian, recording the removal event.  Returns `false`
    /// if the id did not resolve (already removed this step).
    pub fn remove_pedestrian(&mut self, id: AgentId) -> bool {
        match self.pedestrians.remove(&id) {
            Some(ped) => {
                self.events.push_back(TopographyEvent::PedestrianRemoved(ped));
                true
            }
            None => false,
        }
    }

    pub fn pedestrian(&self, id: AgentId) -> Option<&Pedestrian> {
        self.pedestrians.get(&id)
    }

    pub fn pedestrian_mut(&mut self, id: AgentId) -> Option<&mut Pedestrian> {
        self.pedestrians.get_mut(&id)
    }

    /// All pedestrians in ascending id order.
    pub fn pedestrians(&self) -> impl Iterator<Item = &Pedestrian> {
        self.pedestrians.values()
    }

    /// Snapshot of all ids in ascending order.  Update passes iterate over
    /// this so they can mutate pedestrians while scanning.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.pedestrians.keys().copied().collect()
    }

    /// `(id, position)` pairs in ascending id order, for grid building.
    pub fn positions(&self) -> impl Iterator<Item = (AgentId, Point2)> + '_ {
        self.pedestrians.iter().map(|(id, p)| (*id, p.position()))
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.pedestrians.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pedestrians.is_empty()
    }

    // ── Mutation events ───────────────────────────────────────────────────

    /// Drain all recorded events in occurrence order.
    pub fn take_events(&mut self) -> Vec<TopographyEvent> {
        self.events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}
