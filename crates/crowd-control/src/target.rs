//! The target controller: arrival detection, waiting, and absorption.
//!
//! # Arrival
//!
//! Candidates come from the proximity grid: everything within
//! `max_extent + deletion_distance` of the shape center, which covers every
//! point at which the arrival predicate below can hold.  An agent has
//! arrived when this target is the head of its queue and it is inside the
//! shape or within the deletion distance of its boundary.
//!
//! # Waiting
//!
//! A waiting target admits arrived agents into a waiting set before the
//! arrival resolves.
//!
//! - Individual waiting samples a departure time per agent on admission.
//!   `parallel_events` caps how many agents may wait at once (`0` = no cap);
//!   agents over the cap stand at the target unadmitted until a slot opens.
//! - Batch waiting collects exactly `parallel_events` agents, then samples
//!   one departure time and stamps the whole batch with it.  A new batch
//!   starts only after the departing one has fully drained.  A batch size
//!   of `0` can never fill, so its target never releases anyone.
//!
//! # Resolution
//!
//! When the wait is over (immediately, for a non-waiting target) an
//! absorbing target redirects the agent's followers to itself and removes
//! the agent; a non-absorbing target advances the agent's queue and, if
//! configured, imposes its leaving speed.

use crowd_core::{AgentId, Point2, Shape, SimRng, TargetId};
use crowd_dist::{TimeSampler, build_sampler};
use crowd_grid::CellGrid;
use crowd_state::{Pedestrian, Target, Topography};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{ControlError, ControlResult};

/// Observer of arrival events.
///
/// Called once per update for every agent currently counting as arrived, so
/// a waiting agent is reported on every step of its wait.
pub trait TargetListener {
    fn reached_target(&mut self, target: &Target, agent: AgentId);
}

/// Drives one target's arrival handling.
pub struct TargetController {
    target_id: TargetId,
    sampler: Option<Box<dyn TimeSampler>>,
    /// Admitted waiting agents.  `None` means admitted into a batch that has
    /// not been stamped with a departure time yet.
    waiting: FxHashMap<AgentId, Option<f64>>,
    batch_removal_finished: bool,
    listeners: Vec<Box<dyn TargetListener>>,
}

impl TargetController {
    /// Builds the controller, materializing the waiting-time sampler if the
    /// target waits.  A waiting target without a distribution is rejected.
    pub fn new(target: &Target, rng: SimRng) -> ControlResult<Self> {
        let sampler = if target.is_waiting() {
            let spec = target
                .attributes()
                .waiter
                .distribution
                .as_ref()
                .ok_or_else(|| {
                    ControlError::Config(format!(
                        "waiting target {} has no waiting-time distribution",
                        target.id()
                    ))
                })?;
            Some(build_sampler(spec, rng)?)
        } else {
            None
        };

        Ok(Self {
            target_id: target.id(),
            sampler,
            waiting: FxHashMap::default(),
            batch_removal_finished: true,
            listeners: Vec::new(),
        })
    }

    #[inline]
    pub fn target_id(&self) -> TargetId {
        self.target_id
    }

    pub fn register_listener(&mut self, listener: Box<dyn TargetListener>) {
        self.listeners.push(listener);
    }

    /// Agents currently admitted to the waiting set.
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Waiting state of one agent: `None` if not admitted, `Some(None)` if
    /// admitted into an unstamped batch, `Some(Some(t))` once a departure
    /// time is fixed.
    pub fn scheduled_leaving_time(&self, agent: AgentId) -> Option<Option<f64>> {
        self.waiting.get(&agent).copied()
    }

    /// Process all arrivals for the step at `sim_time_secs`.
    pub fn update(
        &mut self,
        sim_time_secs: f64,
        topography: &mut Topography,
        grid: &CellGrid,
    ) -> ControlResult<()> {
        let target = match topography.target(self.target_id) {
            Some(target) => target.clone(),
            None => {
                warn!(target = %self.target_id, "controller's target is gone, skipping update");
                return Ok(());
            }
        };
        // Proxy targets move with their agent; arrivals at them never
        // resolve here.
        if target.is_pedestrian_proxy() {
            return Ok(());
        }

        let deletion_distance = target.attributes().absorber.deletion_distance_m;
        let radius = target.shape().bounds().max_extent() + deletion_distance;

        for agent in grid.query(target.shape().center(), radius) {
            let Some(pedestrian) = topography.pedestrian(agent) else {
                warn!(%agent, target = %self.target_id, "stale agent id in proximity query");
                continue;
            };
            let reached = pedestrian.next_target_id() == Some(self.target_id)
                && !pedestrian.is_following_agent_target()
                && has_reached(target.shape(), deletion_distance, pedestrian.position());
            if !reached {
                continue;
            }

            for listener in &mut self.listeners {
                listener.reached_target(&target, agent);
            }

            if target.is_waiting() {
                self.admit_waiting_agent(agent, sim_time_secs, &target);
            }
            if self.waiting_over(agent, sim_time_secs, &target) {
                self.resolve_arrival(agent, &target, topography);
            }
        }
        Ok(())
    }

    /// Admission into the waiting set; no-op for already admitted agents.
    fn admit_waiting_agent(&mut self, agent: AgentId, sim_time_secs: f64, target: &Target) {
        if self.waiting.contains_key(&agent) {
            return;
        }
        let Some(sampler) = self.sampler.as_mut() else {
            return;
        };
        let cap = target.attributes().parallel_events as usize;

        if target.attributes().waiter.individual_waiting {
            if cap == 0 || self.waiting.len() < cap {
                let leaves_at = sampler.next_sample(sim_time_secs);
                self.waiting.insert(agent, Some(leaves_at));
                debug!(%agent, target = %self.target_id, leaves_at, "admitted to wait");
            }
        } else if self.batch_removal_finished && self.waiting.len() < cap {
            self.waiting.insert(agent, None);
            if self.waiting.len() == cap {
                let leaves_at = sampler.next_sample(sim_time_secs);
                for slot in self.waiting.values_mut() {
                    *slot = Some(leaves_at);
                }
                debug!(target = %self.target_id, leaves_at, batch = cap, "batch complete");
            }
        }
    }

    fn waiting_over(&self, agent: AgentId, sim_time_secs: f64, target: &Target) -> bool {
        if !target.is_waiting() {
            return true;
        }
        matches!(self.waiting.get(&agent), Some(Some(t)) if *t <= sim_time_secs)
    }

    fn resolve_arrival(&mut self, agent: AgentId, target: &Target, topography: &mut Topography) {
        self.waiting.remove(&agent);
        self.batch_removal_finished = self.waiting.is_empty();

        if target.is_absorbing() {
            let followers = topography
                .pedestrian_mut(agent)
                .map(Pedestrian::take_followers)
                .unwrap_or_default();
            for follower in followers {
                if let Some(pedestrian) = topography.pedestrian_mut(follower) {
                    pedestrian.set_single_target(self.target_id, false);
                }
            }
            topography.remove_pedestrian(agent);
            debug!(%agent, target = %self.target_id, "absorbed");
        } else if let Some(pedestrian) = topography.pedestrian_mut(agent) {
            pedestrian.advance_to_next_target();
            if let Some(speed) = target.attributes().leaving_speed_mps {
                pedestrian.set_free_flow_speed_mps(speed);
            }
        }
    }
}

fn has_reached(shape: &Shape, deletion_distance: f64, position: Point2) -> bool {
    shape.contains(position) || shape.signed_distance(position) < deletion_distance
}
