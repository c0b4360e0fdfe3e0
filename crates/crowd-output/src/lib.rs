//! `crowd-output` — simulation output writers for the crowd framework.
//!
//! The CSV backend creates two files in the configured output directory:
//!
//! | File                | Contents                                         |
//! |---------------------|--------------------------------------------------|
//! | `trajectories.csv`  | One row per agent per recorded step              |
//! | `step_summaries.csv`| Agent and compartment counts, one row per step   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `crowd_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crowd_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 1);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StepSummaryRow, TrajectoryRow};
pub use writer::OutputWriter;
