//! The absorbing-area controller: unconditional removal on contact.
//!
//! Unlike an absorbing target, an area removes every agent that touches it
//! regardless of the agent's target queue.  It models a hard boundary such
//! as the edge of the observed domain.

use crowd_core::AreaId;
use crowd_grid::CellGrid;
use crowd_state::{AbsorbingAreaAttributes, Topography};
use tracing::{debug, warn};

/// Drives one absorbing area.
pub struct AbsorbingAreaController {
    attributes: AbsorbingAreaAttributes,
    absorbed_total: u64,
}

impl AbsorbingAreaController {
    pub fn new(attributes: AbsorbingAreaAttributes) -> Self {
        Self {
            attributes,
            absorbed_total: 0,
        }
    }

    #[inline]
    pub fn area_id(&self) -> AreaId {
        self.attributes.id
    }

    /// Agents removed over the whole run.
    pub fn absorbed_total(&self) -> u64 {
        self.absorbed_total
    }

    /// Remove every agent inside the area or within its deletion distance.
    pub fn update(&mut self, _sim_time_secs: f64, topography: &mut Topography, grid: &CellGrid) {
        let shape = &self.attributes.shape;
        let deletion_distance = self.attributes.deletion_distance_m;
        let radius = shape.bounds().max_extent() + deletion_distance;

        for agent in grid.query(shape.center(), radius) {
            let Some(pedestrian) = topography.pedestrian(agent) else {
                warn!(%agent, area = %self.attributes.id, "stale agent id in proximity query");
                continue;
            };
            let position = pedestrian.position();
            if shape.contains(position) || shape.signed_distance(position) < deletion_distance {
                topography.remove_pedestrian(agent);
                self.absorbed_total += 1;
                debug!(%agent, area = %self.attributes.id, "absorbed");
            }
        }
    }
}
