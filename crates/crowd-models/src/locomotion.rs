//! Locomotion models: one position update per agent per step.
//!
//! The stepper reads the psychological and target state written by the other
//! layers and only ever touches positions and footstep history.  A footstep
//! is recorded every step, including a zero-length one for an agent that
//! stands still, so the footstep history measures actual progress over wall
//! time rather than distance between recorded moves.

use crowd_core::{AgentId, Point2};
use crowd_state::{SelfCategory, Topography};

/// Advances every agent once per step.
pub trait LocomotionModel {
    /// Move all agents for the step at `sim_time_secs` of length
    /// `step_length_secs`.
    fn update(&mut self, sim_time_secs: f64, step_length_secs: f64, topography: &mut Topography);
}

/// Straight-line stepper: each agent walks directly toward its current goal
/// at free-flow speed, clamping at the goal instead of overshooting.
///
/// Goal resolution per agent:
/// - no queued target: stand in place
/// - queued target proxies another agent and the follow flag is set: the
///   proxied agent's current position (standing if that agent is gone)
/// - otherwise: the center of the target's shape
///
/// An agent in [`SelfCategory::Wait`] keeps its goal but moves at speed
/// zero, so it resumes toward the same goal when released.
#[derive(Debug, Default)]
pub struct TargetDirectedStepper;

impl TargetDirectedStepper {
    fn goal_of(topography: &Topography, agent: AgentId) -> Option<Point2> {
        let pedestrian = topography.pedestrian(agent)?;
        let target_id = pedestrian.next_target_id()?;
        let target = topography.target(target_id)?;
        if pedestrian.is_following_agent_target() {
            if let Some(leader) = target.proxied_agent() {
                return topography.pedestrian(leader).map(|p| p.position());
            }
        }
        Some(target.shape().center())
    }
}

impl LocomotionModel for TargetDirectedStepper {
    fn update(&mut self, sim_time_secs: f64, step_length_secs: f64, topography: &mut Topography) {
        for agent in topography.agent_ids() {
            let Some(pedestrian) = topography.pedestrian(agent) else {
                continue;
            };

            let speed = match pedestrian.self_category() {
                SelfCategory::Wait => 0.0,
                _ => pedestrian.free_flow_speed_mps(),
            };
            let current = pedestrian.position();

            let next = match Self::goal_of(topography, agent) {
                Some(goal) if speed > 0.0 => {
                    current.step_towards(goal, speed * step_length_secs)
                }
                _ => current,
            };

            if let Some(pedestrian) = topography.pedestrian_mut(agent) {
                pedestrian.move_to(next, sim_time_secs);
            }
        }
    }
}
