//! Samplers materialized from a [`DistributionSpec`].

use crowd_core::SimRng;
use rand::Rng;
use rand_distr::{Binomial, Exp};

use crate::error::{DistError, DistResult};
use crate::spec::DistributionSpec;

/// Source of event times.
///
/// `next_sample` maps the current simulated time to the absolute time of the
/// next event.  Samplers are stateful (they own their RNG stream) and must be
/// asked in chronological order.
pub trait TimeSampler {
    fn next_sample(&mut self, current_time_secs: f64) -> f64;

    /// Absolute time of the first event for a driver whose schedule begins
    /// at `start_time_secs`.  Repeating samplers fire right at the start;
    /// one-shot samplers place the event at their own configured time.
    fn first_sample(&mut self, start_time_secs: f64) -> f64 {
        start_time_secs
    }
}

/// Construct the sampler for `spec`, seeded with its own RNG stream.
///
/// Fails fast on malformed parameters so a bad scenario never starts running.
pub fn build_sampler(
    spec: &DistributionSpec,
    rng: SimRng,
) -> DistResult<Box<dyn TimeSampler>> {
    let invalid = |reason: String| DistError::InvalidParameter {
        kind: spec.kind(),
        reason,
    };

    match *spec {
        DistributionSpec::Constant { update_frequency_secs } => {
            if !(update_frequency_secs > 0.0) || !update_frequency_secs.is_finite() {
                return Err(invalid(format!(
                    "update_frequency_secs must be positive and finite, got {update_frequency_secs}"
                )));
            }
            Ok(Box::new(ConstantSampler {
                period_secs: update_frequency_secs,
            }))
        }
        DistributionSpec::Binomial { trials, probability } => {
            let dist = Binomial::new(trials, probability)
                .map_err(|e| invalid(e.to_string()))?;
            Ok(Box::new(BinomialSampler { dist, rng }))
        }
        DistributionSpec::Poisson { events_per_second } => {
            if !events_per_second.is_finite() {
                return Err(invalid(format!(
                    "events_per_second must be finite, got {events_per_second}"
                )));
            }
            let exp = Exp::new(events_per_second).map_err(|e| invalid(e.to_string()))?;
            Ok(Box::new(PoissonSampler { exp, rng }))
        }
        DistributionSpec::SingleSpawn { spawn_time_secs } => {
            if !spawn_time_secs.is_finite() {
                return Err(invalid(format!(
                    "spawn_time_secs must be finite, got {spawn_time_secs}"
                )));
            }
            Ok(Box::new(SingleSpawnSampler { spawn_time_secs }))
        }
    }
}

// ── Sampler implementations ───────────────────────────────────────────────────

struct ConstantSampler {
    period_secs: f64,
}

impl TimeSampler for ConstantSampler {
    fn next_sample(&mut self, current_time_secs: f64) -> f64 {
        current_time_secs + self.period_secs
    }
}

struct BinomialSampler {
    dist: Binomial,
    rng: SimRng,
}

impl TimeSampler for BinomialSampler {
    fn next_sample(&mut self, current_time_secs: f64) -> f64 {
        current_time_secs + self.rng.inner().sample(self.dist) as f64
    }
}

struct PoissonSampler {
    exp: Exp<f64>,
    rng: SimRng,
}

impl TimeSampler for PoissonSampler {
    fn next_sample(&mut self, current_time_secs: f64) -> f64 {
        current_time_secs + self.rng.inner().sample(self.exp)
    }
}

/// One event at a fixed absolute time.  Callers that drive repeated events
/// (the source controller) treat a sample that does not advance past the
/// previous event as exhaustion.
struct SingleSpawnSampler {
    spawn_time_secs: f64,
}

impl TimeSampler for SingleSpawnSampler {
    fn next_sample(&mut self, _current_time_secs: f64) -> f64 {
        self.spawn_time_secs
    }

    fn first_sample(&mut self, _start_time_secs: f64) -> f64 {
        self.spawn_time_secs
    }
}
