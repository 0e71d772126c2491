//! Exclusion zones around segments and validation of piece positions.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::config::SeparationMetric;
use crate::geom2::{Point, Rect, Segment};

/// Band of half-width `half_width` around a segment.
///
/// `contains` is the rounded (capsule) band; `corners` is the rectangular
/// core, for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZone {
    pub segment: Segment,
    pub half_width: f64,
}

impl ExclusionZone {
    #[inline]
    pub fn new(segment: Segment, half_width: f64) -> Self {
        Self {
            segment,
            half_width,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.segment.midpoint()
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.segment.angle()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.segment.distance_to_point(p) < self.half_width
    }

    /// Rectangle `length × 2·half_width` aligned with the segment, CCW.
    pub fn corners(&self) -> [Point; 4] {
        let hl = self.segment.length() * 0.5;
        let hw = self.half_width;
        let (s, c) = self.angle().sin_cos();
        let c0 = self.center();
        [(-hl, -hw), (hl, -hw), (hl, hw), (-hl, hw)]
            .map(|(x, y)| c0 + Vector2::new(x * c - y * s, x * s + y * c))
    }
}

/// One zone of half-width `min_separation` per segment.
pub fn exclusion_zones(segments: &[Segment], min_separation: f64) -> Vec<ExclusionZone> {
    segments
        .iter()
        .map(|s| ExclusionZone::new(*s, min_separation))
        .collect()
}

/// Spacing rules for user-placed pieces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionRules {
    /// Minimum distance to the king.
    pub king_spacing: f64,
    /// Minimum distance to any segment.
    pub segment_clearance: f64,
    /// Minimum distance to any other placed piece.
    pub piece_spacing: f64,
    pub metric: SeparationMetric,
}

impl Default for PositionRules {
    fn default() -> Self {
        Self {
            // king radius + piece radius + margin
            king_spacing: 5.0 + 3.0 + 5.0,
            segment_clearance: 5.0,
            piece_spacing: 6.0,
            metric: SeparationMetric::Clamped,
        }
    }
}

/// Whether a piece may be put at `p` inside `region`.
pub fn is_valid_position(
    p: Point,
    region: &Rect,
    segments: &[Segment],
    king: Option<Point>,
    pieces: &[Point],
    rules: &PositionRules,
) -> bool {
    if !region.contains(p) {
        return false;
    }
    if king.is_some_and(|k| (p - k).norm() < rules.king_spacing) {
        return false;
    }
    if segments
        .iter()
        .any(|s| rules.metric.distance(s, p) < rules.segment_clearance)
    {
        return false;
    }
    pieces.iter().all(|q| (p - q).norm() >= rules.piece_spacing)
}
