//! Planar geometry for scenario elements and agent positions.
//!
//! Positions are double-precision meters on a bounded plane.  Shapes support
//! the three queries the simulation needs: point containment, signed distance
//! to the boundary (negative inside), and an axis-aligned bounding box.
//! Containment on `Rect` is half-open (`min <= p < max`) so adjacent cells
//! and elements tile without overlap.

use crate::error::{CoreError, CoreResult};

// ── Point2 ────────────────────────────────────────────────────────────────────

/// A point (or displacement) in the simulation plane, in meters.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other` in meters.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Squared distance — cheaper than [`Point2::distance`] for comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// The point reached by moving at most `max_step` meters from `self`
    /// toward `goal`.  Never overshoots: if `goal` is closer than `max_step`
    /// the result is `goal` itself.
    pub fn step_towards(self, goal: Point2, max_step: f64) -> Point2 {
        let dist = self.distance(goal);
        if dist <= max_step || dist == 0.0 {
            return goal;
        }
        let scale = max_step / dist;
        Point2::new(
            self.x + (goal.x - self.x) * scale,
            self.y + (goal.y - self.y) * scale,
        )
    }

    /// Both coordinates are finite (no NaN or infinity).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle given by its min corner and extent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: min edges inclusive, max edges exclusive.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x < self.x + self.width
            && p.y < self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// The larger of width and height.  Controllers use this as the query
    /// radius base so a candidate scan always covers the whole shape.
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Signed distance to the rectangle boundary: negative inside, zero on
    /// the boundary, positive outside.
    pub fn signed_distance(&self, p: Point2) -> f64 {
        let dx = (self.x - p.x).max(p.x - (self.x + self.width));
        let dy = (self.y - p.y).max(p.y - (self.y + self.height));
        if dx > 0.0 || dy > 0.0 {
            dx.max(0.0).hypot(dy.max(0.0))
        } else {
            dx.max(dy)
        }
    }

    /// Check the rectangle is finite with positive extent.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(CoreError::NonFiniteCoordinate);
        }
        if !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(CoreError::EmptyRect {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

// ── Shape ─────────────────────────────────────────────────────────────────────

/// The footprint of a scenario element (target, source, absorbing area).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Shape {
    Rectangle(Rect),
    Circle { center: Point2, radius: f64 },
    Polygon { points: Vec<Point2> },
}

impl Shape {
    /// Whether `p` lies inside the shape.  Polygons use even-odd ray casting,
    /// so self-intersecting outlines behave like their even-odd fill.
    pub fn contains(&self, p: Point2) -> bool {
        match self {
            Shape::Rectangle(r) => r.contains(p),
            Shape::Circle { center, radius } => p.distance(*center) <= *radius,
            Shape::Polygon { points } => polygon_contains(points, p),
        }
    }

    /// Signed distance from `p` to the shape boundary: negative inside.
    pub fn signed_distance(&self, p: Point2) -> f64 {
        match self {
            Shape::Rectangle(r) => r.signed_distance(p),
            Shape::Circle { center, radius } => p.distance(*center) - radius,
            Shape::Polygon { points } => {
                let d = polygon_edge_distance(points, p);
                if polygon_contains(points, p) { -d } else { d }
            }
        }
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(r) => *r,
            Shape::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            Shape::Polygon { points } => {
                let mut min_x = f64::INFINITY;
                let mut min_y = f64::INFINITY;
                let mut max_x = f64::NEG_INFINITY;
                let mut max_y = f64::NEG_INFINITY;
                for p in points {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
            }
        }
    }

    /// Center of the bounding box.  Locomotion steers toward this point and
    /// controllers center their candidate query on it.
    #[inline]
    pub fn center(&self) -> Point2 {
        self.bounds().center()
    }

    /// Check the shape is well-formed.  Scenario documents are deserialized
    /// without validation; the builder calls this before a run starts.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            Shape::Rectangle(r) => r.validate(),
            Shape::Circle { center, radius } => {
                if !center.is_finite() {
                    return Err(CoreError::NonFiniteCoordinate);
                }
                if !(*radius > 0.0) || !radius.is_finite() {
                    return Err(CoreError::BadRadius(*radius));
                }
                Ok(())
            }
            Shape::Polygon { points } => {
                if points.len() < 3 {
                    return Err(CoreError::TooFewVertices(points.len()));
                }
                if points.iter().any(|p| !p.is_finite()) {
                    return Err(CoreError::NonFiniteCoordinate);
                }
                Ok(())
            }
        }
    }
}

/// Even-odd rule point-in-polygon test over the closed outline.
fn polygon_contains(points: &[Point2], p: Point2) -> bool {
    let mut inside = false;
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Minimum distance from `p` to any edge of the closed outline.
fn polygon_edge_distance(points: &[Point2], p: Point2) -> f64 {
    let n = points.len();
    let mut best = f64::INFINITY;
    let mut j = n.saturating_sub(1);
    for i in 0..n {
        best = best.min(segment_distance(points[j], points[i], p));
        j = i;
    }
    best
}

/// Distance from `p` to the segment `ab`.
fn segment_distance(a: Point2, b: Point2, p: Point2) -> f64 {
    let len_sq = a.distance_sq(b);
    if len_sq == 0.0 {
        return a.distance(p);
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let proj = Point2::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    proj.distance(p)
}
