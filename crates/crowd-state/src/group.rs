//! Pedestrian group bookkeeping.

use crowd_core::{AgentId, GroupId};

/// A set of agents sharing a group identity.
///
/// Groups are owned by whichever model created them; the agents carry the
/// group id (see `Pedestrian::assign_group`) and the group carries the
/// member list, so membership questions never scan the population.
#[derive(Clone, Debug)]
pub struct Group {
    id: GroupId,
    capacity: usize,
    members: Vec<AgentId>,
}

impl Group {
    pub fn new(id: GroupId, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            members: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Nominal capacity.  Open-membership groups use a capacity far above
    /// any realistic population and never fill.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }

    pub fn members(&self) -> &[AgentId] {
        &self.members
    }

    /// Add `agent` to the group.  Membership is tracked once per agent;
    /// re-adding a current member is a caller bug.
    pub fn add_member(&mut self, agent: AgentId) {
        debug_assert!(!self.contains(agent), "{agent} already in {}", self.id);
        self.members.push(agent);
    }

    /// Remove `agent` if present.  Returns `true` when the group is empty
    /// afterwards, which tells the owning model to drop the group.
    pub fn remove_member(&mut self, agent: AgentId) -> bool {
        self.members.retain(|m| *m != agent);
        self.members.is_empty()
    }
}
