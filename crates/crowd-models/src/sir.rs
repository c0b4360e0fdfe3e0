//! Susceptible / infected / removed group dynamics.
//!
//! # Model
//!
//! Compartments are represented as three pseudo-groups with reserved ids in
//! the upper half of the `GroupId` range, lazily created on first use and
//! dropped as soon as they empty.  Each agent's primary group id *is* its
//! compartment; there is no second copy of the state to drift out of sync.
//!
//! Rates are per-second probabilities.  For a step of length `Δt` the
//! per-step probability is
//!
//!   p = 1 − (1 − rate)^Δt
//!
//! with `Δt` measured against the model's own record of the previous update
//! time, so the model stays correct if the driver ever changes its step
//! length mid-run.
//!
//! The per-agent scan runs in ascending id order.  Recovery is checked
//! before infection and a recovered agent is done for the step.  A
//! susceptible agent scans its grid neighborhood and flips on the first
//! successful draw against an infectious neighbor; the flip is visible to
//! agents later in the same scan, which is what lets an infection chain
//! propagate through a dense crowd within one step.

use crowd_core::{AgentId, GroupId, SimRng};
use crowd_grid::CellGrid;
use crowd_state::{Group, Pedestrian, SirAttributes, Topography};
use rustc_hash::FxHashMap;

use crate::error::{ModelError, ModelResult};
use crate::group::{CompartmentCounts, GroupModel};

/// Base of the reserved pseudo-group id range.  Scenario group ids count up
/// from zero and never reach it.
const RESERVED_GROUP_ID_BASE: u32 = u32::MAX / 2;

/// Announced capacity of the pseudo-groups: effectively unbounded.
const RESERVED_GROUP_CAPACITY: usize = (u32::MAX / 2) as usize;

/// The three epidemiological compartments.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SirCompartment {
    Infected,
    Susceptible,
    Removed,
}

impl SirCompartment {
    /// The reserved group id backing this compartment.
    pub fn group_id(self) -> GroupId {
        match self {
            SirCompartment::Infected => GroupId(RESERVED_GROUP_ID_BASE),
            SirCompartment::Susceptible => GroupId(RESERVED_GROUP_ID_BASE + 1),
            SirCompartment::Removed => GroupId(RESERVED_GROUP_ID_BASE + 2),
        }
    }

    /// Inverse of [`SirCompartment::group_id`]; `None` for ordinary group ids.
    pub fn from_group_id(id: GroupId) -> Option<Self> {
        match id.0.checked_sub(RESERVED_GROUP_ID_BASE) {
            Some(0) => Some(SirCompartment::Infected),
            Some(1) => Some(SirCompartment::Susceptible),
            Some(2) => Some(SirCompartment::Removed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SirCompartment::Infected => "infected",
            SirCompartment::Susceptible => "susceptible",
            SirCompartment::Removed => "removed",
        }
    }
}

/// Per-step transition probability for a per-second `rate` over `delta_secs`.
///
/// Zero elapsed time yields zero probability, so calling `update` twice at
/// the same simulated time cannot double-apply a transition chance.
pub fn step_probability(rate_per_second: f64, delta_secs: f64) -> f64 {
    1.0 - (1.0 - rate_per_second).powf(delta_secs)
}

/// SIR dynamics over the pedestrian population.
pub struct SirGroupModel {
    attributes: SirAttributes,
    rng: SimRng,
    groups: FxHashMap<GroupId, Group>,
    /// Infections handed out at spawn time (both rate-drawn and quota);
    /// compared against `infections_at_start` to seed the epidemic.
    total_infected: u32,
    last_sim_time_secs: f64,
}

impl SirGroupModel {
    /// Validates the attributes and builds the model.  Rates outside
    /// `[0, 1]` or a non-positive infection distance are configuration
    /// errors: the probability formula and the grid are meaningless for
    /// them, so the scenario is rejected before it runs.
    pub fn new(attributes: SirAttributes, rng: SimRng) -> ModelResult<Self> {
        for (name, rate) in [
            ("infection_rate_per_second", attributes.infection_rate_per_second),
            ("recovery_rate_per_second", attributes.recovery_rate_per_second),
        ] {
            if !(0.0..=1.0).contains(&rate) || !rate.is_finite() {
                return Err(ModelError::Config(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        let distance = attributes.infection_max_distance_m;
        if !(distance > 0.0) || !distance.is_finite() {
            return Err(ModelError::Config(format!(
                "infection_max_distance_m must be positive and finite, got {distance}"
            )));
        }

        Ok(Self {
            attributes,
            rng,
            groups: FxHashMap::default(),
            total_infected: 0,
            last_sim_time_secs: 0.0,
        })
    }

    pub fn attributes(&self) -> &SirAttributes {
        &self.attributes
    }

    /// Spawn infections handed out so far.
    pub fn total_infected(&self) -> u32 {
        self.total_infected
    }

    /// The registry entry for `id`, if the group currently has members.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// The compartment an agent currently belongs to.
    ///
    /// Fails if the agent carries no group id or the id does not resolve in
    /// the registry — either way the membership invariant is broken and the
    /// step must not continue on guesswork.
    pub fn compartment_of(&self, pedestrian: &Pedestrian) -> ModelResult<SirCompartment> {
        let group_id = pedestrian
            .primary_group_id()
            .ok_or(ModelError::MissingGroup(pedestrian.id()))?;
        if !self.groups.contains_key(&group_id) {
            return Err(ModelError::MissingGroup(pedestrian.id()));
        }
        SirCompartment::from_group_id(group_id)
            .ok_or(ModelError::MissingGroup(pedestrian.id()))
    }

    /// Force an agent into a compartment, releasing any current membership.
    ///
    /// Meant for scenario setup: pre-placed index cases get their
    /// compartment stamped before the run starts, and the stamped agents
    /// count toward the `infections_at_start` quota so the quota tops the
    /// epidemic up instead of adding to explicit seeds.
    pub fn seed_compartment(
        &mut self,
        topography: &mut Topography,
        agent: AgentId,
        compartment: SirCompartment,
    ) -> ModelResult<()> {
        let previous = topography
            .pedestrian(agent)
            .ok_or(ModelError::AgentNotFound(agent))?
            .primary_group_id();
        if let Some(group_id) = previous {
            self.remove_membership(agent, group_id)?;
        }
        if compartment == SirCompartment::Infected {
            self.total_infected += 1;
        }
        self.assign_to_group(topography, agent, compartment)
    }

    /// Compartment for a newly entering agent.
    ///
    /// The rate draw happens unconditionally; the quota check then forces
    /// the infected compartment while fewer than `infections_at_start`
    /// spawn infections exist.  Every infected assignment made here counts
    /// toward the quota, whichever condition triggered it.
    fn entry_compartment(&mut self) -> SirCompartment {
        let draw: f64 = self.rng.random();
        if draw < self.attributes.infection_rate_per_second
            || self.total_infected < self.attributes.infections_at_start
        {
            self.total_infected += 1;
            SirCompartment::Infected
        } else {
            SirCompartment::Susceptible
        }
    }

    /// Put `agent` into `compartment`, creating the pseudo-group on first
    /// use, and stamp the membership onto the pedestrian.
    fn assign_to_group(
        &mut self,
        topography: &mut Topography,
        agent: AgentId,
        compartment: SirCompartment,
    ) -> ModelResult<()> {
        let pedestrian = topography
            .pedestrian_mut(agent)
            .ok_or(ModelError::AgentNotFound(agent))?;
        let group_id = compartment.group_id();
        let group = self
            .groups
            .entry(group_id)
            .or_insert_with(|| Group::new(group_id, RESERVED_GROUP_CAPACITY));
        group.add_member(agent);
        pedestrian.assign_group(group_id, group.capacity());
        Ok(())
    }

    /// Release `agent` from the group behind `group_id`, dropping the group
    /// if that emptied it.
    fn remove_membership(&mut self, agent: AgentId, group_id: GroupId) -> ModelResult<()> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(ModelError::MissingGroup(agent))?;
        if group.remove_member(agent) {
            self.groups.remove(&group_id);
        }
        Ok(())
    }

    /// Move a live agent between compartments.
    fn transition(
        &mut self,
        topography: &mut Topography,
        agent: AgentId,
        from: SirCompartment,
        to: SirCompartment,
    ) -> ModelResult<()> {
        self.remove_membership(agent, from.group_id())?;
        self.assign_to_group(topography, agent, to)
    }

    fn members_of(&self, compartment: SirCompartment) -> usize {
        self.groups
            .get(&compartment.group_id())
            .map(Group::len)
            .unwrap_or(0)
    }
}

impl GroupModel for SirGroupModel {
    fn pre_loop(&mut self, _sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        self.drain_topography_events(topography)?;
        // Agents constructed outside the event flow still need compartments.
        let unassigned: Vec<AgentId> = topography
            .pedestrians()
            .filter(|p| p.primary_group_id().is_none())
            .map(Pedestrian::id)
            .collect();
        for agent in unassigned {
            let compartment = self.entry_compartment();
            self.assign_to_group(topography, agent, compartment)?;
        }
        Ok(())
    }

    fn update(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        self.drain_topography_events(topography)?;

        let delta_secs = sim_time_secs - self.last_sim_time_secs;
        self.last_sim_time_secs = sim_time_secs;

        if topography.is_empty() {
            return Ok(());
        }

        // Cell length equals the infection radius, so one ring of cells
        // around an agent covers every possible infectious neighbor.
        let cell_size = self.attributes.infection_max_distance_m;
        let grid = CellGrid::build(topography.bounds(), cell_size, topography.positions())?;

        let infection_prob =
            step_probability(self.attributes.infection_rate_per_second, delta_secs);
        let recovery_prob =
            step_probability(self.attributes.recovery_rate_per_second, delta_secs);

        for agent in topography.agent_ids() {
            let compartment = match topography.pedestrian(agent) {
                Some(ped) => self.compartment_of(ped)?,
                None => continue,
            };

            if compartment == SirCompartment::Infected {
                let draw: f64 = self.rng.random();
                if draw < recovery_prob {
                    self.transition(
                        topography,
                        agent,
                        SirCompartment::Infected,
                        SirCompartment::Removed,
                    )?;
                    continue;
                }
            }

            if compartment != SirCompartment::Susceptible {
                continue;
            }

            let position = match topography.pedestrian(agent) {
                Some(ped) => ped.position(),
                None => continue,
            };

            for neighbor in grid.query(position, cell_size) {
                if neighbor == agent {
                    continue;
                }
                let neighbor_compartment = match topography.pedestrian(neighbor) {
                    Some(ped) => self.compartment_of(ped)?,
                    None => continue,
                };
                if neighbor_compartment == SirCompartment::Infected {
                    let draw: f64 = self.rng.random();
                    if draw < infection_prob {
                        self.transition(
                            topography,
                            agent,
                            SirCompartment::Susceptible,
                            SirCompartment::Infected,
                        )?;
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn element_added(&mut self, agent: AgentId, topography: &mut Topography) -> ModelResult<()> {
        let already_grouped = topography
            .pedestrian(agent)
            .ok_or(ModelError::AgentNotFound(agent))?
            .primary_group_id()
            .is_some();
        // Seeded index cases arrive with their compartment already stamped.
        if already_grouped {
            return Ok(());
        }
        let compartment = self.entry_compartment();
        self.assign_to_group(topography, agent, compartment)
    }

    fn element_removed(&mut self, pedestrian: &Pedestrian) -> ModelResult<()> {
        let group_id = pedestrian
            .primary_group_id()
            .ok_or(ModelError::MissingGroup(pedestrian.id()))?;
        self.remove_membership(pedestrian.id(), group_id)
    }

    fn compartment_counts(&self) -> CompartmentCounts {
        CompartmentCounts {
            susceptible: self.members_of(SirCompartment::Susceptible),
            infected: self.members_of(SirCompartment::Infected),
            removed: self.members_of(SirCompartment::Removed),
        }
    }
}
