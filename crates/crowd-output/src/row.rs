//! Plain data row types written by output backends.

/// One agent's position at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub step:      u64,
    pub time_secs: f64,
    pub agent_id:  u32,
    pub x:         f64,
    pub y:         f64,
}

/// Summary statistics for one simulation step.
///
/// The compartment columns are `None` when the run has no group model; CSV
/// output leaves those cells empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:        u64,
    pub time_secs:   f64,
    pub agent_count: u64,
    pub susceptible: Option<u64>,
    pub infected:    Option<u64>,
    pub removed:     Option<u64>,
}
