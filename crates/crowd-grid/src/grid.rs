//! Dense uniform grid over a bounded rectangle.

use crowd_core::{AgentId, Point2, Rect};

use crate::error::{GridError, GridResult};

/// A per-step spatial snapshot: every agent bucketed into the cell containing
/// its position.
///
/// Cells are square with side `cell_size`, laid out row-major over `bounds`.
/// Positions outside the bounds clamp into the boundary cells, so a stray
/// agent is still indexed rather than lost.
///
/// Build order is preserved per cell and cells are scanned row-major, so for
/// positions fed in ascending id order the query result is deterministic.
#[derive(Debug)]
pub struct CellGrid {
    bounds: Rect,
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<AgentId>>,
    agent_count: usize,
}

impl CellGrid {
    /// Bucket `positions` into a fresh grid.
    ///
    /// Fails on degenerate bounds or a non-positive cell size; both are
    /// scenario configuration mistakes, caught here once rather than
    /// producing empty query results forever after.
    pub fn build(
        bounds: Rect,
        cell_size: f64,
        positions: impl IntoIterator<Item = (AgentId, Point2)>,
    ) -> GridResult<Self> {
        if !(bounds.width > 0.0 && bounds.height > 0.0)
            || !bounds.width.is_finite()
            || !bounds.height.is_finite()
        {
            return Err(GridError::DegenerateBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(GridError::InvalidCellSize(cell_size));
        }

        let cols = ((bounds.width / cell_size).ceil() as usize).max(1);
        let rows = ((bounds.height / cell_size).ceil() as usize).max(1);

        let mut grid = Self {
            bounds,
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            agent_count: 0,
        };
        for (id, pos) in positions {
            let (col, row) = grid.cell_of(pos);
            grid.cells[row * grid.cols + col].push(id);
            grid.agent_count += 1;
        }
        Ok(grid)
    }

    /// All agents in cells overlapping the bounding box of the circle
    /// `(center, radius)`.
    ///
    /// This is a superset of the agents truly within `radius`: membership is
    /// decided at cell granularity.  Callers needing the exact set filter the
    /// result by true distance.
    pub fn query(&self, center: Point2, radius: f64) -> Vec<AgentId> {
        let (min_col, min_row) = self.cell_of(Point2::new(center.x - radius, center.y - radius));
        let (max_col, max_row) = self.cell_of(Point2::new(center.x + radius, center.y + radius));

        let mut out = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                out.extend_from_slice(&self.cells[row * self.cols + col]);
            }
        }
        out
    }

    /// Number of agents bucketed at build time.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell coordinates containing `p`, clamped to the grid.
    fn cell_of(&self, p: Point2) -> (usize, usize) {
        let col = ((p.x - self.bounds.x) / self.cell_size).floor();
        let row = ((p.y - self.bounds.y) / self.cell_size).floor();
        let col = (col.max(0.0) as usize).min(self.cols - 1);
        let row = (row.max(0.0) as usize).min(self.rows - 1);
        (col, row)
    }
}
