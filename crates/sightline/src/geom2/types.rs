//! Basic 2D value types used by placement and visibility.
//!
//! - `GeomCfg`: centralizes tolerances for determinant, distance and angle checks.
//! - `Line`: infinite line through two points; a computational helper, never stored.
//! - `Segment`: bounded segment with containment and distance queries.
//! - `Rect`: axis-aligned region `[min_x, max_x] × [min_y, max_y]`.
//!
//! Code cross-refs: `intersect::{intersect, segments_intersect}`, `util::{bearing, cross}`

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::intersect;
use super::util::cross;

/// A point (or free vector) in the plane.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeomCfg {
    /// Cross products at or below this magnitude count as collinear.
    pub eps_det: f64,
    /// Distances at or below this count as coincident.
    pub eps_dist: f64,
    /// Angles closer than this are merged into one sweep event.
    pub eps_angle: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-9,
            eps_dist: 1e-9,
            eps_angle: 1e-12,
        }
    }
}

/// Infinite line through `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Line through `point` with direction `(cos angle, sin angle)`.
    #[inline]
    pub fn from_angle(point: Point, angle: f64) -> Self {
        Self {
            a: point,
            b: point + Vector2::new(angle.cos(), angle.sin()),
        }
    }

    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.b - self.a
    }

    /// Exact parallelism (zero determinant), matching `intersect`.
    #[inline]
    pub fn is_parallel(&self, other: &Line) -> bool {
        cross(self.direction(), other.direction()) == 0.0
    }

    #[inline]
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        intersect::intersect(self, other)
    }
}

/// Bounded segment from `start` to `end`.
///
/// Zero-length segments are accepted everywhere; distance queries then fall
/// back to the distance from the single point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.end - self.start
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    /// Angle of `end - start`.
    #[inline]
    pub fn angle(&self) -> f64 {
        let d = self.direction();
        d.y.atan2(d.x)
    }

    /// Supporting infinite line.
    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.length() > 0.0)
    }

    /// Point at parameter `t` (`t = 0` is `start`, `t = 1` is `end`).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.start + self.direction() * t
    }

    /// `p` lies on the segment iff it is within `length` of both endpoints.
    ///
    /// Only meaningful for points already known to be collinear with the
    /// segment; off-line points inside the lens also pass.
    pub fn contains(&self, p: Point) -> bool {
        let len = self.length();
        (self.start - p).norm() <= len && (self.end - p).norm() <= len
    }

    /// Perpendicular distance from `p` to the infinite supporting line.
    ///
    /// Underestimates the distance to the segment when the projection of
    /// `p` falls outside `[start, end]`; see `distance_to_point`.
    pub fn distance_to_line(&self, p: Point) -> f64 {
        let d = self.direction();
        let len = d.norm();
        if !(len > 0.0) {
            return (p - self.start).norm();
        }
        cross(d, p - self.start).abs() / len
    }

    /// Euclidean distance from `p` to the closest point of the segment.
    pub fn distance_to_point(&self, p: Point) -> f64 {
        (p - self.closest_point(p)).norm()
    }

    /// Projection of `p` clamped to the segment.
    pub fn closest_point(&self, p: Point) -> Point {
        let d = self.direction();
        let len2 = d.norm_squared();
        if !(len2 > 0.0) {
            return self.start;
        }
        let t = ((p - self.start).dot(&d) / len2).clamp(0.0, 1.0);
        self.point_at(t)
    }

    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        intersect::segments_intersect(self, other, &GeomCfg::default())
    }
}

/// Axis-aligned rectangle.
///
/// Invariant: `width >= 0` and `height >= 0`. `contains` is inclusive on all
/// four edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Negative extents are clamped to zero.
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Vector2::new(self.min_x, self.min_y)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Vector2::new(self.min_x + self.width * 0.5, self.min_y + self.height * 0.5)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True for zero-area or non-finite rects.
    pub fn is_empty(&self) -> bool {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        !finite || !(self.width > 0.0) || !(self.height > 0.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x() && p.y >= self.min_y && p.y <= self.max_y()
    }

    /// Shrink by `d` on every side; extents never go below zero.
    pub fn inset(&self, d: f64) -> Rect {
        Rect::new(
            self.min_x + d,
            self.min_y + d,
            self.width - 2.0 * d,
            self.height - 2.0 * d,
        )
    }

    /// Nearest point of the rect (inclusive edges).
    pub fn clamp(&self, p: Point) -> Point {
        Vector2::new(
            p.x.clamp(self.min_x, self.max_x()),
            p.y.clamp(self.min_y, self.max_y()),
        )
    }

    /// Edge `x = max_x`.
    pub fn max_x_edge(&self) -> Line {
        Line::new(
            Vector2::new(self.max_x(), self.min_y),
            Vector2::new(self.max_x(), self.max_y()),
        )
    }

    /// Edge `x = min_x`.
    pub fn min_x_edge(&self) -> Line {
        Line::new(
            Vector2::new(self.min_x, self.min_y),
            Vector2::new(self.min_x, self.max_y()),
        )
    }

    /// Edge `y = max_y`.
    pub fn max_y_edge(&self) -> Line {
        Line::new(
            Vector2::new(self.min_x, self.max_y()),
            Vector2::new(self.max_x(), self.max_y()),
        )
    }

    /// Edge `y = min_y`.
    pub fn min_y_edge(&self) -> Line {
        Line::new(
            Vector2::new(self.min_x, self.min_y),
            Vector2::new(self.max_x(), self.min_y),
        )
    }
}
