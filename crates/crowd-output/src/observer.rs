//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use crowd_sim::{SimObserver, StepView};

use crate::row::{StepSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes trajectories and step summaries to any
/// [`OutputWriter`] backend.
///
/// A summary row is written for every step (including the initial state at
/// step 0); trajectory rows are written every `trajectory_interval_steps`
/// steps.  Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:                    W,
    trajectory_interval_steps: u64,
    last_error:                Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    ///
    /// `trajectory_interval_steps` of 1 records every step; larger values
    /// thin the trajectory output (0 is treated as 1).
    pub fn new(writer: W, trajectory_interval_steps: u64) -> Self {
        Self {
            writer,
            trajectory_interval_steps: trajectory_interval_steps.max(1),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn record(&mut self, view: &StepView<'_>) {
        let counts = view.compartments;
        let summary = StepSummaryRow {
            step:        view.step,
            time_secs:   view.time_secs,
            agent_count: view.topography.agent_count() as u64,
            susceptible: counts.map(|c| c.susceptible as u64),
            infected:    counts.map(|c| c.infected as u64),
            removed:     counts.map(|c| c.removed as u64),
        };
        let result = self.writer.write_step_summary(&summary);
        self.store_err(result);

        if view.step % self.trajectory_interval_steps != 0 {
            return;
        }
        let rows: Vec<TrajectoryRow> = view
            .topography
            .positions()
            .map(|(id, p)| TrajectoryRow {
                step:      view.step,
                time_secs: view.time_secs,
                agent_id:  id.0,
                x:         p.x,
                y:         p.y,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_trajectories(&rows);
            self.store_err(result);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn run_started(&mut self, view: &StepView<'_>) {
        self.record(view);
    }

    fn step_finished(&mut self, view: &StepView<'_>) {
        self.record(view);
    }

    fn run_finished(&mut self, _view: &StepView<'_>) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
