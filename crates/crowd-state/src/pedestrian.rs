//! Per-agent state.

use std::collections::VecDeque;

use crowd_core::{AgentId, GroupId, Point2, TargetId};

use crate::attributes::AgentAttributes;
use crate::footstep::{Footstep, FootstepHistory};
use crate::psychology::{InformationState, SelfCategory};

/// One simulated pedestrian.
///
/// The target queue is ordered: the front entry is the current destination,
/// and arriving at it advances the queue.  Group membership is a pair of
/// parallel lists (ids and announced sizes) whose first entry is the primary
/// group; the group model keeps them consistent with its registry.
#[derive(Clone, Debug)]
pub struct Pedestrian {
    id: AgentId,
    position: Point2,
    free_flow_speed_mps: f64,
    targets: VecDeque<TargetId>,
    /// The front target refers to another agent (a pedestrian-proxy target)
    /// rather than a fixed scenario element.
    following_agent_target: bool,
    followers: Vec<AgentId>,
    group_ids: Vec<GroupId>,
    group_sizes: Vec<usize>,
    footsteps: FootstepHistory,
    self_category: SelfCategory,
    information_state: InformationState,
}

impl Pedestrian {
    pub fn new(id: AgentId, position: Point2, attributes: &AgentAttributes) -> Self {
        Self {
            id,
            position,
            free_flow_speed_mps: attributes.free_flow_speed_mps,
            targets: VecDeque::new(),
            following_agent_target: false,
            followers: Vec::new(),
            group_ids: Vec::new(),
            group_sizes: Vec::new(),
            footsteps: FootstepHistory::new(attributes.footstep_history_capacity),
            self_category: SelfCategory::default(),
            information_state: InformationState::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Reposition without recording a footstep (initial placement).
    pub fn place(&mut self, position: Point2) {
        self.position = position;
    }

    /// Move to `position` at `time_secs`, recording the footstep.
    pub fn move_to(&mut self, position: Point2, time_secs: f64) {
        self.position = position;
        self.footsteps.push(Footstep {
            position,
            time_secs,
        });
    }

    #[inline]
    pub fn free_flow_speed_mps(&self) -> f64 {
        self.free_flow_speed_mps
    }

    pub fn set_free_flow_speed_mps(&mut self, speed: f64) {
        self.free_flow_speed_mps = speed;
    }

    // ── Target queue ──────────────────────────────────────────────────────

    #[inline]
    pub fn has_next_target(&self) -> bool {
        !self.targets.is_empty()
    }

    /// The current destination, if any.
    #[inline]
    pub fn next_target_id(&self) -> Option<TargetId> {
        self.targets.front().copied()
    }

    /// `true` while the current destination is a pedestrian-proxy target.
    #[inline]
    pub fn is_following_agent_target(&self) -> bool {
        self.following_agent_target && !self.targets.is_empty()
    }

    /// Replace the whole queue with fixed scenario targets.
    pub fn set_targets(&mut self, targets: impl IntoIterator<Item = TargetId>) {
        self.targets = targets.into_iter().collect();
        self.following_agent_target = false;
    }

    /// Drop everything and head for `target` alone.  `following_agent` marks
    /// the target as a pedestrian proxy.
    pub fn set_single_target(&mut self, target: TargetId, following_agent: bool) {
        self.targets.clear();
        self.targets.push_back(target);
        self.following_agent_target = following_agent;
    }

    /// Arriving at the current destination: advance to the next one.
    pub fn advance_to_next_target(&mut self) {
        self.targets.pop_front();
        self.following_agent_target = false;
    }

    // ── Followers ─────────────────────────────────────────────────────────

    pub fn followers(&self) -> &[AgentId] {
        &self.followers
    }

    pub fn add_follower(&mut self, follower: AgentId) {
        self.followers.push(follower);
    }

    /// Detach and return all followers (used when this agent is absorbed and
    /// its followers must be redirected).
    pub fn take_followers(&mut self) -> Vec<AgentId> {
        std::mem::take(&mut self.followers)
    }

    // ── Group membership ──────────────────────────────────────────────────

    /// The primary (first-listed) group, if the agent belongs to any.
    #[inline]
    pub fn primary_group_id(&self) -> Option<GroupId> {
        self.group_ids.first().copied()
    }

    pub fn group_ids(&self) -> &[GroupId] {
        &self.group_ids
    }

    pub fn group_sizes(&self) -> &[usize] {
        &self.group_sizes
    }

    /// Make `group` the agent's sole membership, announcing `size`.
    pub fn assign_group(&mut self, group: GroupId, size: usize) {
        self.group_ids.clear();
        self.group_sizes.clear();
        self.group_ids.push(group);
        self.group_sizes.push(size);
    }

    // ── Gait and psychology ───────────────────────────────────────────────

    pub fn footsteps(&self) -> &FootstepHistory {
        &self.footsteps
    }

    #[inline]
    pub fn self_category(&self) -> SelfCategory {
        self.self_category
    }

    pub fn set_self_category(&mut self, category: SelfCategory) {
        self.self_category = category;
    }

    #[inline]
    pub fn information_state(&self) -> InformationState {
        self.information_state
    }

    pub fn set_information_state(&mut self, state: InformationState) {
        self.information_state = state;
    }
}
