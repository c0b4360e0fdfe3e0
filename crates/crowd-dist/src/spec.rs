//! Declarative distribution descriptions as they appear in scenario files.

use serde::{Deserialize, Serialize};

/// A distribution over event times, described by name and parameters.
///
/// A `DistributionSpec` is plain data: deserializing one performs no validation, and an
/// out-of-range parameter only surfaces when [`build_sampler`] is called.
///
/// [`build_sampler`]: crate::build_sampler
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionSpec {
    /// Events at a fixed period.  Despite the name (kept from the scenario
    /// format), `update_frequency_secs` is the period between events.
    Constant { update_frequency_secs: f64 },

    /// The gap to the next event is a binomial draw `B(trials, probability)`
    /// interpreted as whole seconds.
    Binomial { trials: u64, probability: f64 },

    /// Poisson process with the given rate: gaps are exponentially
    /// distributed with mean `1 / events_per_second`.
    Poisson { events_per_second: f64 },

    /// A single event at an absolute time.
    SingleSpawn { spawn_time_secs: f64 },
}

impl DistributionSpec {
    /// Stable name of the variant, for error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DistributionSpec::Constant { .. } => "constant",
            DistributionSpec::Binomial { .. } => "binomial",
            DistributionSpec::Poisson { .. } => "poisson",
            DistributionSpec::SingleSpawn { .. } => "single_spawn",
        }
    }
}
