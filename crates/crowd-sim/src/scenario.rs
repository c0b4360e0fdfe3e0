//! The scenario document: a complete, serializable run description.
//!
//! A scenario is plain data.  Everything that can be wrong with one
//! (dangling target references, malformed shapes, out-of-range rates) is
//! caught by the builder, not here, so documents round-trip through serde
//! untouched.

use crowd_core::{Point2, Rect, TargetId};
use crowd_models::SirCompartment;
use crowd_state::{
    AbsorbingAreaAttributes, AgentAttributes, SimulationAttributes, SirAttributes,
    SourceAttributes, TargetAttributes,
};
use serde::{Deserialize, Serialize};

/// A full run description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub simulation: SimulationAttributes,
    pub topography: TopographyPlan,
    #[serde(default)]
    pub models: ModelPlan,
}

impl Scenario {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The world layout: bounds, defaults, and scenario elements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopographyPlan {
    pub bounds: Rect,
    #[serde(default)]
    pub agent: AgentAttributes,
    /// Agents present before the first step.
    #[serde(default)]
    pub pedestrians: Vec<PlacedPedestrian>,
    #[serde(default)]
    pub targets: Vec<TargetAttributes>,
    #[serde(default)]
    pub sources: Vec<SourceAttributes>,
    #[serde(default)]
    pub absorbing_areas: Vec<AbsorbingAreaAttributes>,
}

/// An agent placed by hand rather than emitted by a source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacedPedestrian {
    pub position: Point2,
    #[serde(default)]
    pub target_ids: Vec<TargetId>,
    /// Initial compartment.  `None` lets the group model decide on entry
    /// like it does for source-spawned agents.
    #[serde(default)]
    pub compartment: Option<InitialCompartment>,
}

/// Compartment of a pre-placed pedestrian, as written in scenario files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialCompartment {
    Susceptible,
    Infected,
    Removed,
}

impl From<InitialCompartment> for SirCompartment {
    fn from(value: InitialCompartment) -> Self {
        match value {
            InitialCompartment::Susceptible => SirCompartment::Susceptible,
            InitialCompartment::Infected => SirCompartment::Infected,
            InitialCompartment::Removed => SirCompartment::Removed,
        }
    }
}

/// Which models run, and with what parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPlan {
    /// Susceptible / infected / removed dynamics.  `None` runs without a
    /// group model.
    pub sir: Option<SirAttributes>,
    /// Registry name of the cognition model.
    pub cognition: String,
}

impl Default for ModelPlan {
    fn default() -> Self {
        Self {
            sir: None,
            cognition: "target_oriented".to_string(),
        }
    }
}
