//! The target scenario element.

use crowd_core::{AgentId, Shape, TargetId};

use crate::attributes::TargetAttributes;

/// A destination agents walk to.
///
/// Most targets are fixed scenario elements.  A pedestrian-proxy target
/// stands in for another agent being followed; its controller never
/// processes arrivals (the proxied agent moves every step, and absorption
/// through a proxy would delete the leader out from under its followers).
#[derive(Clone, Debug)]
pub struct Target {
    attributes: TargetAttributes,
    proxied_agent: Option<AgentId>,
}

impl Target {
    pub fn new(attributes: TargetAttributes) -> Self {
        Self {
            attributes,
            proxied_agent: None,
        }
    }

    /// A dynamic target standing in for `agent`.
    pub fn for_agent(attributes: TargetAttributes, agent: AgentId) -> Self {
        Self {
            attributes,
            proxied_agent: Some(agent),
        }
    }

    #[inline]
    pub fn id(&self) -> TargetId {
        self.attributes.id
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.attributes.shape
    }

    pub fn attributes(&self) -> &TargetAttributes {
        &self.attributes
    }

    #[inline]
    pub fn is_pedestrian_proxy(&self) -> bool {
        self.proxied_agent.is_some()
    }

    pub fn proxied_agent(&self) -> Option<AgentId> {
        self.proxied_agent
    }

    /// Whether arriving agents are removed from the simulation.
    #[inline]
    pub fn is_absorbing(&self) -> bool {
        self.attributes.absorber.enabled
    }

    /// Whether arriving agents are delayed before the arrival resolves.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.attributes.waiter.enabled
    }
}
