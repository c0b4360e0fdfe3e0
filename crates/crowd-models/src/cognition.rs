//! Cognition models: per-step classification of each agent's behavioral
//! stance, written into [`SelfCategory`] for the locomotion layer to read.
//!
//! Models are stateless classifiers looked up by name from a registry, so a
//! scenario file can select one with a plain string.

use crowd_state::{Pedestrian, SelfCategory, Topography};

use crate::error::{ModelError, ModelResult};

/// Minimum recorded footsteps before a stall judgment is made.  With fewer
/// samples the average speed is dominated by spawn placement.
const REQUIRED_FOOTSTEPS: usize = 2;

/// Average speed at or below which an agent counts as unable to move.
const MAX_STALL_SPEED_MPS: f64 = 0.05;

/// Per-step reassessment of every agent's `SelfCategory`.
///
/// Cognition never fails and never changes positions or group structure; it
/// only rewrites psychological state, so `update` returns nothing.
pub trait CognitionModel {
    /// Registry name of this model.
    fn name(&self) -> &'static str;

    /// Reassess all agents for the step at `sim_time_secs`.
    fn update(&mut self, sim_time_secs: f64, topography: &mut Topography);
}

/// Baseline model: every agent heads for its target every step.
#[derive(Debug, Default)]
pub struct TargetOrientedCognitionModel;

impl CognitionModel for TargetOrientedCognitionModel {
    fn name(&self) -> &'static str {
        "target_oriented"
    }

    fn update(&mut self, _sim_time_secs: f64, topography: &mut Topography) {
        for agent in topography.agent_ids() {
            if let Some(pedestrian) = topography.pedestrian_mut(agent) {
                pedestrian.set_self_category(SelfCategory::TargetOriented);
            }
        }
    }
}

/// Stall-aware model: an agent whose recent average speed has collapsed is
/// flagged [`SelfCategory::Cooperative`] so the locomotion layer can resolve
/// the jam; everyone else stays target oriented.
#[derive(Debug, Default)]
pub struct CooperativeCognitionModel;

impl CooperativeCognitionModel {
    fn cannot_move(pedestrian: &Pedestrian) -> bool {
        let footsteps = pedestrian.footsteps();
        footsteps.len() >= REQUIRED_FOOTSTEPS
            && footsteps.average_speed_mps() <= MAX_STALL_SPEED_MPS
    }
}

impl CognitionModel for CooperativeCognitionModel {
    fn name(&self) -> &'static str {
        "cooperative"
    }

    fn update(&mut self, _sim_time_secs: f64, topography: &mut Topography) {
        for agent in topography.agent_ids() {
            let Some(pedestrian) = topography.pedestrian_mut(agent) else {
                continue;
            };
            let category = if Self::cannot_move(pedestrian) {
                SelfCategory::Cooperative
            } else {
                SelfCategory::TargetOriented
            };
            pedestrian.set_self_category(category);
        }
    }
}

// ── Registry ────────────────────────────────────────────────────────────────

fn target_oriented() -> Box<dyn CognitionModel> {
    Box::new(TargetOrientedCognitionModel)
}

fn cooperative() -> Box<dyn CognitionModel> {
    Box::new(CooperativeCognitionModel)
}

const COGNITION_MODELS: &[(&str, fn() -> Box<dyn CognitionModel>)] = &[
    ("target_oriented", target_oriented),
    ("cooperative", cooperative),
];

/// Look up a cognition model by registry name.
pub fn cognition_model_from_name(name: &str) -> ModelResult<Box<dyn CognitionModel>> {
    COGNITION_MODELS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, build)| build())
        .ok_or_else(|| ModelError::UnknownCognitionModel(name.to_string()))
}

/// Names accepted by [`cognition_model_from_name`], in registry order.
pub fn cognition_model_names() -> impl Iterator<Item = &'static str> {
    COGNITION_MODELS.iter().map(|(key, _)| *key)
}
