//! `crowd-dist` — event-time distributions for spawning and waiting.
//!
//! Scenario documents describe distributions declaratively as a
//! [`DistributionSpec`] (a type name plus its parameters).  At build time the
//! spec is turned into a boxed [`TimeSampler`] that answers one question:
//! given the current simulated time, when does the next event happen?
//!
//! | Spec variant  | Next sample                                          |
//! |---------------|------------------------------------------------------|
//! | `Constant`    | `current + update_frequency_secs`                    |
//! | `Binomial`    | `current + B(trials, probability)` (integer seconds) |
//! | `Poisson`     | `current + Exp(events_per_second)`                   |
//! | `SingleSpawn` | `spawn_time_secs`, regardless of current time        |
//!
//! Malformed parameters (probability outside `[0, 1]`, non-positive rate,
//! NaN) are configuration errors: [`build_sampler`] refuses to construct the
//! sampler rather than producing one that misbehaves mid-run.

pub mod error;
pub mod sampler;
pub mod spec;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DistError, DistResult};
pub use sampler::{TimeSampler, build_sampler};
pub use spec::DistributionSpec;
