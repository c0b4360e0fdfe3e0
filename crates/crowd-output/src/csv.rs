//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trajectories.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StepSummaryRow, TrajectoryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trajectories: Writer<File>,
    summaries:    Writer<File>,
    finished:     bool,
}

fn count_cell(value: Option<u64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectories = Writer::from_path(dir.join("trajectories.csv"))?;
        trajectories.write_record(["step", "time_secs", "agent_id", "x", "y"])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record([
            "step",
            "time_secs",
            "agent_count",
            "susceptible",
            "infected",
            "removed",
        ])?;

        Ok(Self {
            trajectories,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectories.write_record(&[
                row.step.to_string(),
                row.time_secs.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.time_secs.to_string(),
            row.agent_count.to_string(),
            count_cell(row.susceptible),
            count_cell(row.infected),
            count_cell(row.removed),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectories.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
