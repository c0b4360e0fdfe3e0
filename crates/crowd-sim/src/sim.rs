//! The step loop.
//!
//! # Step order
//!
//! Each step runs a fixed sequence over the shared topography:
//!
//! 1. sources fire pending spawn events
//! 2. locomotion moves every agent once
//! 3. cognition reclassifies every agent
//! 4. the group model updates (draining pending topography events first)
//! 5. the proximity grid is rebuilt from current positions
//! 6. target controllers process arrivals
//! 7. absorbing areas remove agents on contact
//! 8. events from controller removals are drained to the group model
//! 9. observers see the completed step
//!
//! The order is part of the framework contract: models may rely on it, and
//! it is what makes runs bit-reproducible for a fixed seed.

use crowd_control::{AbsorbingAreaController, SourceController, TargetController, TargetListener};
use crowd_core::{SimClock, TargetId};
use crowd_grid::CellGrid;
use crowd_models::{CognitionModel, CompartmentCounts, GroupModel, LocomotionModel};
use crowd_state::Topography;
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::observer::{SimObserver, StepView};

/// A fully built simulation, ready to run.
///
/// Construction goes through [`SimulationBuilder`](crate::SimulationBuilder);
/// every id reference and parameter has been validated by the time a value
/// of this type exists.
pub struct Simulation {
    pub(crate) name: String,
    pub(crate) clock: SimClock,
    pub(crate) finish_time_secs: f64,
    pub(crate) topography: Topography,
    pub(crate) group_model: Option<Box<dyn GroupModel>>,
    pub(crate) cognition: Box<dyn CognitionModel>,
    pub(crate) locomotion: Box<dyn LocomotionModel>,
    pub(crate) sources: Vec<SourceController>,
    pub(crate) targets: Vec<TargetController>,
    pub(crate) areas: Vec<AbsorbingAreaController>,
    /// Cell length of the per-step proximity grid for controllers.
    pub(crate) controller_cell_size: f64,
}

impl Simulation {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    #[inline]
    pub fn topography(&self) -> &Topography {
        &self.topography
    }

    /// Compartment populations, when a group model runs.
    pub fn compartment_counts(&self) -> Option<CompartmentCounts> {
        self.group_model.as_ref().map(|m| m.compartment_counts())
    }

    #[inline]
    pub fn finish_time_secs(&self) -> f64 {
        self.finish_time_secs
    }

    /// `true` once simulated time has reached the configured finish time.
    pub fn is_finished(&self) -> bool {
        self.clock.now_secs() >= self.finish_time_secs
    }

    /// Attach a listener to the controller of `target`.
    pub fn register_target_listener(
        &mut self,
        target: TargetId,
        listener: Box<dyn TargetListener>,
    ) -> SimResult<()> {
        let controller = self
            .targets
            .iter_mut()
            .find(|c| c.target_id() == target)
            .ok_or(SimError::UnknownTarget(target))?;
        controller.register_listener(listener);
        Ok(())
    }

    /// Execute one step and advance the clock.
    pub fn step(&mut self) -> SimResult<()> {
        let now = self.clock.now_secs();
        let step_length = self.clock.step_length_secs;

        for source in &mut self.sources {
            source.update(now, &mut self.topography);
        }
        self.locomotion.update(now, step_length, &mut self.topography);
        self.cognition.update(now, &mut self.topography);
        if let Some(model) = &mut self.group_model {
            model.update(now, &mut self.topography)?;
        }

        if !self.topography.is_empty() {
            let grid = CellGrid::build(
                self.topography.bounds(),
                self.controller_cell_size,
                self.topography.positions(),
            )?;
            for target in &mut self.targets {
                target.update(now, &mut self.topography, &grid)?;
            }
            for area in &mut self.areas {
                area.update(now, &mut self.topography, &grid);
            }
        }

        self.drain_pending_events()?;
        self.clock.advance();
        Ok(())
    }

    /// Run to the finish time, reporting each step to `observer`.
    pub fn run(&mut self, observer: &mut dyn SimObserver) -> SimResult<()> {
        info!(name = %self.name, finish = self.finish_time_secs, "run started");

        if let Some(model) = &mut self.group_model {
            model.pre_loop(self.clock.now_secs(), &mut self.topography)?;
        } else {
            self.drain_pending_events()?;
        }
        observer.run_started(&self.view());

        while !self.is_finished() {
            observer.step_started(&self.view());
            self.step()?;
            observer.step_finished(&self.view());
        }

        if let Some(model) = &mut self.group_model {
            model.post_loop(self.clock.now_secs(), &mut self.topography)?;
        }
        observer.run_finished(&self.view());

        info!(
            name = %self.name,
            steps = self.clock.step_count,
            agents_left = self.topography.agent_count(),
            "run finished"
        );
        Ok(())
    }

    /// Hand controller-made removals and spawns to the group model; without
    /// one they are discarded so the queue cannot grow without bound.
    fn drain_pending_events(&mut self) -> SimResult<()> {
        match &mut self.group_model {
            Some(model) => model.drain_topography_events(&mut self.topography)?,
            None => {
                self.topography.take_events();
            }
        }
        Ok(())
    }

    fn view(&self) -> StepView<'_> {
        StepView {
            step: self.clock.step_count,
            time_secs: self.clock.now_secs(),
            topography: &self.topography,
            compartments: self.compartment_counts(),
        }
    }
}
