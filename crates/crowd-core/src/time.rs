//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous simulated seconds advanced in fixed steps:
//!
//!   sim_time = step_count * step_length_secs
//!
//! The canonical state is the integer step counter; the fractional time is
//! derived from it on demand, so repeated addition cannot accumulate
//! floating-point drift over long runs.  The step length is an explicit
//! parameter carried by the clock — nothing in the framework reads it from
//! ambient global state.

use std::fmt;

/// Fixed-step simulation clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds of simulated time per step.
    pub step_length_secs: f64,
    /// Steps completed so far — advanced by `SimClock::advance()`.
    pub step_count: u64,
}

impl SimClock {
    /// Create a clock at time zero with the given step length.
    pub fn new(step_length_secs: f64) -> Self {
        Self {
            step_length_secs,
            step_count: 0,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.step_count += 1;
    }

    /// Current simulated time in seconds, derived from the step counter.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.step_count as f64 * self.step_length_secs
    }

    /// Simulated time one step from now.  Update passes that integrate over
    /// the step use `[now_secs, next_secs)` as their interval.
    #[inline]
    pub fn next_secs(&self) -> f64 {
        (self.step_count + 1) as f64 * self.step_length_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} (t = {:.2} s)", self.step_count, self.now_secs())
    }
}
