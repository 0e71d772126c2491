//! Inputs and outputs of the visibility computation.
//!
//! - `Piece`: viewpoint plus facing angle.
//! - `VisibilityConfig`: view radius (cap on the otherwise unbounded FOV) and
//!   half-aperture.
//! - `VisibilityPolygon`: closed boundary as a list of line and arc edges,
//!   starting and ending at the viewpoint.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom2::{cross, normalize_angle, unit, Point};

/// Error type for visibility entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum VisibilityError {
    InvalidConfig { reason: String },
    InvalidPiece { reason: String },
}

impl VisibilityError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn piece(reason: impl Into<String>) -> Self {
        Self::InvalidPiece {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for VisibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid visibility config: {reason}"),
            Self::InvalidPiece { reason } => write!(f, "invalid piece: {reason}"),
        }
    }
}

impl std::error::Error for VisibilityError {}

/// An agent with a field of view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub position: Point,
    /// Facing angle in `[0, 2π)`.
    pub facing: f64,
}

impl Piece {
    /// Normalizes `facing` into `[0, 2π)`.
    pub fn new(position: Point, facing: f64) -> Self {
        Self {
            position,
            facing: normalize_angle(facing),
        }
    }

    #[inline]
    pub fn distance(&self, p: Point) -> f64 {
        (self.position - p).norm()
    }

    pub(crate) fn validate(&self) -> Result<(), VisibilityError> {
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err(VisibilityError::piece("position must be finite"));
        }
        if !self.facing.is_finite() {
            return Err(VisibilityError::piece("facing must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    pub view_radius: f64,
    /// Half of the aperture, in `(0, π]`.
    pub half_aperture: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            view_radius: 400.0,
            half_aperture: 20f64.to_radians(),
        }
    }
}

impl VisibilityConfig {
    pub fn validate(&self) -> Result<(), VisibilityError> {
        if !self.view_radius.is_finite() || self.view_radius <= 0.0 {
            return Err(VisibilityError::invalid(
                "view_radius must be finite and > 0",
            ));
        }
        if !(self.half_aperture > 0.0 && self.half_aperture <= PI) {
            return Err(VisibilityError::invalid("half_aperture must lie in (0, π]"));
        }
        Ok(())
    }
}

/// One piece of the polygon boundary, ending at `to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryEdge {
    Line {
        to: Point,
    },
    /// Counter-clockwise arc of radius `VisibilityPolygon::radius` around the
    /// viewpoint; angles are absolute and `from_angle < to_angle`.
    Arc {
        from_angle: f64,
        to_angle: f64,
        to: Point,
    },
}

impl BoundaryEdge {
    #[inline]
    pub fn end(&self) -> Point {
        match *self {
            Self::Line { to } | Self::Arc { to, .. } => to,
        }
    }

    #[inline]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }
}

/// Visible region of a piece: star-shaped w.r.t. `viewpoint`, traversed
/// counter-clockwise from `start_angle` to `end_angle`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityPolygon {
    pub viewpoint: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// The last edge always returns to `viewpoint`.
    pub edges: Vec<BoundaryEdge>,
}

impl VisibilityPolygon {
    /// Corner vertices: the viewpoint, then each edge's end point. Arcs
    /// contribute only their end points. First and last entries are the
    /// viewpoint.
    pub fn vertices(&self) -> Vec<Point> {
        std::iter::once(self.viewpoint)
            .chain(self.edges.iter().map(BoundaryEdge::end))
            .collect()
    }

    pub fn arc_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_arc()).count()
    }

    /// Vertices with every arc replaced by chords spanning at most
    /// `max_step` radians. Closed like `vertices`.
    pub fn tessellate(&self, max_step: f64) -> Vec<Point> {
        let mut out = vec![self.viewpoint];
        for edge in &self.edges {
            match *edge {
                BoundaryEdge::Line { to } => out.push(to),
                BoundaryEdge::Arc {
                    from_angle,
                    to_angle,
                    to,
                } => {
                    let span = to_angle - from_angle;
                    let n = if max_step > 0.0 {
                        ((span / max_step).ceil() as usize).max(1)
                    } else {
                        1
                    };
                    for k in 1..n {
                        let a = from_angle + span * (k as f64) / (n as f64);
                        out.push(self.viewpoint + unit(a) * self.radius);
                    }
                    out.push(to);
                }
            }
        }
        out
    }

    /// Exact area: the straight-edged polygon plus the circular segment cut
    /// off by each arc's chord.
    pub fn area(&self) -> f64 {
        let verts = self.vertices();
        let mut twice = 0.0;
        for w in verts.windows(2) {
            twice += cross(w[0], w[1]);
        }
        let r2 = self.radius * self.radius;
        let caps: f64 = self
            .edges
            .iter()
            .filter_map(|e| match *e {
                BoundaryEdge::Arc {
                    from_angle,
                    to_angle,
                    ..
                } => {
                    let phi = to_angle - from_angle;
                    Some(0.5 * r2 * (phi - phi.sin()))
                }
                BoundaryEdge::Line { .. } => None,
            })
            .sum();
        0.5 * twice + caps
    }

    /// Ray-casting point-in-polygon against a fine tessellation.
    pub fn contains(&self, p: Point) -> bool {
        let poly = self.tessellate(0.25f64.to_radians());
        let n = poly.len();
        if n < 4 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (poly[i].x, poly[i].y);
            let (xj, yj) = (poly[j].x, poly[j].y);
            if (yi > p.y) != (yj > p.y) {
                let x_cross = (xj - xi) * (p.y - yi) / (yj - yi) + xi;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
