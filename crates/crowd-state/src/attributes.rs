//! Serde attribute structs for scenario elements and models.
//!
//! Attributes are plain data with the defaults a scenario may omit.  They
//! are never mutated after the builder hands them to their owners, so
//! controllers can clone what they need without a consistency worry.
//! Validation (positive rates, well-formed shapes, required distributions)
//! happens once in the simulation builder, not here.

use crowd_core::{AreaId, Shape, SourceId, TargetId};
use crowd_dist::DistributionSpec;
use serde::{Deserialize, Serialize};

// ── Simulation ────────────────────────────────────────────────────────────────

/// Run-level parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationAttributes {
    /// Length of one simulation step in seconds.
    pub step_length_secs: f64,
    /// Simulated time at which the run stops.
    pub finish_time_secs: f64,
    /// Master RNG seed.  The same seed always reproduces the run exactly.
    pub seed: u64,
}

impl Default for SimulationAttributes {
    fn default() -> Self {
        Self {
            step_length_secs: 0.4,
            finish_time_secs: 500.0,
            seed: 0,
        }
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

/// Defaults applied to every pedestrian the topography creates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentAttributes {
    pub radius_m: f64,
    pub free_flow_speed_mps: f64,
    /// Footsteps kept per agent for gait analysis.
    pub footstep_history_capacity: usize,
}

impl Default for AgentAttributes {
    fn default() -> Self {
        Self {
            radius_m: 0.2,
            free_flow_speed_mps: 1.34,
            footstep_history_capacity: 10,
        }
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// Absorption behavior of a target.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsorberAttributes {
    pub enabled: bool,
    /// An agent within this distance of the shape boundary counts as
    /// arrived even while still outside the shape.
    pub deletion_distance_m: f64,
}

impl Default for AbsorberAttributes {
    fn default() -> Self {
        Self {
            enabled: true,
            deletion_distance_m: 0.1,
        }
    }
}

/// Waiting behavior of a target.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiterAttributes {
    pub enabled: bool,
    /// Waiting-time distribution.  Required when `enabled`; the builder
    /// rejects a waiting target without one.
    pub distribution: Option<DistributionSpec>,
    /// `true`: each agent waits out its own sampled time.  `false`: agents
    /// are admitted into a batch that departs together.
    pub individual_waiting: bool,
}

impl Default for WaiterAttributes {
    fn default() -> Self {
        Self {
            enabled: false,
            distribution: None,
            individual_waiting: true,
        }
    }
}

/// A target scenario element's full configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetAttributes {
    pub id: TargetId,
    pub shape: Shape,
    #[serde(default)]
    pub absorber: AbsorberAttributes,
    #[serde(default)]
    pub waiter: WaiterAttributes,
    /// Walking speed imposed on agents leaving a non-absorbing target.
    /// `None` keeps each agent's own free-flow speed.
    #[serde(default)]
    pub leaving_speed_mps: Option<f64>,
    /// Cap on agents allowed to wait at once.  `0` means no cap for
    /// individual waiting; for batch waiting it describes the batch size,
    /// so `0` is a batch that never fills and never departs.
    #[serde(default)]
    pub parallel_events: u32,
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// When and how fast a source emits agents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnerAttributes {
    /// Distribution of spawn-event times.
    pub distribution: DistributionSpec,
    /// Agents created per spawn event.
    #[serde(default = "default_event_element_count")]
    pub event_element_count: u32,
    /// Total cap across the whole run.  `None` is unlimited.
    #[serde(default)]
    pub max_spawn_total: Option<u32>,
    /// No events before this time.
    #[serde(default)]
    pub start_time_secs: f64,
    /// No events at or after this time.  `None` is unlimited.
    #[serde(default)]
    pub end_time_secs: Option<f64>,
    /// `true`: spawn positions are drawn uniformly inside the shape.
    /// `false`: agents appear at the shape center.
    #[serde(default)]
    pub spawn_at_random_positions: bool,
}

fn default_event_element_count() -> u32 {
    1
}

/// A source scenario element's full configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceAttributes {
    pub id: SourceId,
    pub shape: Shape,
    pub spawner: SpawnerAttributes,
    /// Target queue handed to every agent this source creates.
    #[serde(default)]
    pub target_ids: Vec<TargetId>,
}

// ── Absorbing areas ───────────────────────────────────────────────────────────

/// An area that removes any agent entering it, regardless of the agent's
/// target queue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AbsorbingAreaAttributes {
    pub id: AreaId,
    pub shape: Shape,
    #[serde(default = "default_deletion_distance")]
    pub deletion_distance_m: f64,
}

fn default_deletion_distance() -> f64 {
    0.1
}

// ── SIR group model ───────────────────────────────────────────────────────────

/// Parameters of the susceptible / infected / removed group model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SirAttributes {
    /// Per-second probability that one infectious neighbor infects a
    /// susceptible agent.
    pub infection_rate_per_second: f64,
    /// Per-second probability that an infected agent recovers.
    pub recovery_rate_per_second: f64,
    /// Infection radius; also the cell length of the proximity grid.
    pub infection_max_distance_m: f64,
    /// Agents forced infected on entry until this many infections occurred.
    pub infections_at_start: u32,
}

impl Default for SirAttributes {
    fn default() -> Self {
        Self {
            infection_rate_per_second: 0.01,
            recovery_rate_per_second: 0.01,
            infection_max_distance_m: 1.0,
            infections_at_start: 10,
        }
    }
}
