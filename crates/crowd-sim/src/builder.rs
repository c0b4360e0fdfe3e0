//! Scenario validation and simulation assembly.
//!
//! The builder is the single gate between a scenario document and a running
//! simulation: every cross-reference and parameter is checked here, so the
//! step loop and the controllers can assume a consistent world.
//!
//! Randomness is split off one master stream seeded from the scenario.
//! Each consumer (group model, every source, every waiting target) gets a
//! child stream keyed by its element id, so adding an element changes only
//! its own stream and the run stays reproducible for a fixed document.

use std::collections::BTreeSet;

use crowd_control::{AbsorbingAreaController, SourceController, TargetController};
use crowd_core::{AgentId, SimClock, SimRng};
use crowd_models::{
    GroupModel, SirCompartment, SirGroupModel, TargetDirectedStepper, cognition_model_from_name,
};
use crowd_state::{Target, Topography};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::scenario::Scenario;
use crate::sim::Simulation;

// Child-stream offsets.  Element ids are mixed in below these bases.
const RNG_STREAM_MODEL: u64 = 1;
const RNG_STREAM_SOURCE: u64 = 1 << 32;
const RNG_STREAM_TARGET: u64 = 2 << 32;

/// Validates a [`Scenario`] and assembles the [`Simulation`].
pub struct SimulationBuilder {
    scenario: Scenario,
}

impl SimulationBuilder {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(Self::new(Scenario::from_json(json)?))
    }

    pub fn build(self) -> SimResult<Simulation> {
        let Scenario {
            name,
            simulation,
            topography: plan,
            models,
        } = self.scenario;

        let scenario_err = |message: String| Err(SimError::Scenario(message));

        // ── Run parameters ────────────────────────────────────────────────
        let step = simulation.step_length_secs;
        if !(step > 0.0) || !step.is_finite() {
            return scenario_err(format!(
                "step_length_secs must be positive and finite, got {step}"
            ));
        }
        let finish = simulation.finish_time_secs;
        if !(finish >= 0.0) || !finish.is_finite() {
            return scenario_err(format!(
                "finish_time_secs must be non-negative and finite, got {finish}"
            ));
        }
        plan.bounds.validate()?;

        // ── Element consistency ───────────────────────────────────────────
        let mut target_ids = BTreeSet::new();
        for target in &plan.targets {
            target.shape.validate()?;
            if !target_ids.insert(target.id) {
                return scenario_err(format!("duplicate target id {}", target.id));
            }
        }
        let mut source_ids = BTreeSet::new();
        for source in &plan.sources {
            source.shape.validate()?;
            if !source_ids.insert(source.id) {
                return scenario_err(format!("duplicate source id {}", source.id));
            }
            for id in &source.target_ids {
                if !target_ids.contains(id) {
                    return scenario_err(format!(
                        "source {} references unknown target {id}",
                        source.id
                    ));
                }
            }
        }
        let mut area_ids = BTreeSet::new();
        for area in &plan.absorbing_areas {
            area.shape.validate()?;
            if !area_ids.insert(area.id) {
                return scenario_err(format!("duplicate absorbing area id {}", area.id));
            }
        }
        for placed in &plan.pedestrians {
            if !placed.position.is_finite() {
                return scenario_err(format!(
                    "placed pedestrian at non-finite position {:?}",
                    placed.position
                ));
            }
            for id in &placed.target_ids {
                if !target_ids.contains(id) {
                    return scenario_err(format!(
                        "placed pedestrian references unknown target {id}"
                    ));
                }
            }
        }

        // Controllers query everything within reach of one element, so one
        // cell per largest reach keeps those queries to a 3x3 block.
        let mut controller_cell_size = 1.0_f64;
        for target in &plan.targets {
            let reach = target.shape.bounds().max_extent() + target.absorber.deletion_distance_m;
            controller_cell_size = controller_cell_size.max(reach);
        }
        for area in &plan.absorbing_areas {
            let reach = area.shape.bounds().max_extent() + area.deletion_distance_m;
            controller_cell_size = controller_cell_size.max(reach);
        }

        // ── World assembly ────────────────────────────────────────────────
        let mut master = SimRng::new(simulation.seed);
        let mut world = Topography::new(plan.bounds, plan.agent);
        for attributes in plan.targets {
            world.add_target(Target::new(attributes));
        }

        let mut seeded: Vec<(AgentId, SirCompartment)> = Vec::new();
        for placed in &plan.pedestrians {
            let agent = world.spawn_pedestrian(placed.position);
            if let Some(pedestrian) = world.pedestrian_mut(agent) {
                pedestrian.set_targets(placed.target_ids.iter().copied());
            }
            if let Some(compartment) = placed.compartment {
                seeded.push((agent, compartment.into()));
            }
        }

        // ── Models ────────────────────────────────────────────────────────
        let group_model: Option<Box<dyn GroupModel>> = match models.sir {
            Some(attributes) => {
                let mut model = SirGroupModel::new(attributes, master.child(RNG_STREAM_MODEL))?;
                for (agent, compartment) in seeded {
                    model.seed_compartment(&mut world, agent, compartment)?;
                }
                Some(Box::new(model))
            }
            None if seeded.is_empty() => None,
            None => {
                return scenario_err(
                    "scenario seeds compartments but configures no sir model".to_string(),
                );
            }
        };
        let cognition = cognition_model_from_name(&models.cognition)?;
        let locomotion = Box::new(TargetDirectedStepper);

        // ── Controllers ───────────────────────────────────────────────────
        let mut sources = Vec::with_capacity(plan.sources.len());
        for attributes in plan.sources {
            let rng = master.child(RNG_STREAM_SOURCE + u64::from(attributes.id.0));
            sources.push(SourceController::new(attributes, rng)?);
        }
        let mut targets = Vec::new();
        for target in world.targets() {
            let rng = master.child(RNG_STREAM_TARGET + u64::from(target.id().0));
            targets.push(TargetController::new(target, rng)?);
        }
        let areas = plan
            .absorbing_areas
            .into_iter()
            .map(AbsorbingAreaController::new)
            .collect::<Vec<_>>();

        debug!(
            name = %name,
            targets = targets.len(),
            sources = sources.len(),
            areas = areas.len(),
            agents = world.agent_count(),
            "scenario assembled"
        );

        Ok(Simulation {
            name,
            clock: SimClock::new(step),
            finish_time_secs: finish,
            topography: world,
            group_model,
            cognition,
            locomotion,
            sources,
            targets,
            areas,
            controller_cell_size,
        })
    }
}
