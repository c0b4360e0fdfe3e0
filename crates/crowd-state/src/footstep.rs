//! Bounded footstep history used for gait analysis.

use std::collections::VecDeque;

use crowd_core::Point2;

/// One recorded step: where the agent stood and when.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Footstep {
    pub position: Point2,
    pub time_secs: f64,
}

/// A sliding window of the most recent footsteps.
///
/// The window length is fixed at construction; pushing beyond it evicts the
/// oldest entry.  Cognition models read the window to detect a stalled gait.
#[derive(Clone, Debug)]
pub struct FootstepHistory {
    capacity: usize,
    steps: VecDeque<Footstep>,
}

impl FootstepHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            steps: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, step: Footstep) {
        if self.steps.len() == self.capacity {
            self.steps.pop_front();
        }
        self.steps.push_back(step);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&Footstep> {
        self.steps.back()
    }

    /// Average speed over the recorded window: total path length between
    /// consecutive footsteps divided by elapsed time.  Returns `0.0` when the
    /// window holds fewer than two steps or spans no time.
    pub fn average_speed_mps(&self) -> f64 {
        if self.steps.len() < 2 {
            return 0.0;
        }
        let duration = self.steps.back().map(|s| s.time_secs).unwrap_or(0.0)
            - self.steps.front().map(|s| s.time_secs).unwrap_or(0.0);
        if duration <= 0.0 {
            return 0.0;
        }
        let mut path = 0.0;
        for pair in self.steps.iter().zip(self.steps.iter().skip(1)) {
            path += pair.0.position.distance(pair.1.position);
        }
        path / duration
    }
}
