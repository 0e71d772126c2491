//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for workspace
//!   code (CLI, benches, demos). Breaking changes are allowed and expected.
//! - Prefer these re-exports for consistency across call sites.

// 2D primitives
pub use crate::geom2::{
    bearing, intersect, normalize_angle, segments_intersect, wrap_pi, GeomCfg, Line, Point, Rect,
    Segment,
};
// Replayable randomness
pub use crate::geom2::rand::{sample_angle, sample_point, ReplayToken};
// Placement
pub use crate::placement::{
    exclusion_zones, generate_region, generate_round, generate_segments, is_valid_position,
    place_point, try_place_point, ExclusionZone, LayoutCfg, PlacementConfig, PlacementError,
    Playfield, PositionRules, Region, RegionRound, Round, SeparationMetric, Side,
};
// Visibility
pub use crate::visibility::{
    compute_visibility_polygon, BoundaryEdge, Piece, VisibilityConfig, VisibilityError,
    VisibilityPolygon,
};

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn round_then_fov_through_api() {
        let field = Playfield::new(Rect::new(0.0, 0.0, 400.0, 800.0), LayoutCfg::default()).unwrap();
        let round = generate_round(&field, &PlacementConfig::default(), ReplayToken::new(5, 0)).unwrap();
        let segs = round.all_segments();
        let piece = Piece::new(vector![200.0, 400.0], -std::f64::consts::FRAC_PI_2);
        let poly = compute_visibility_polygon(&piece, &segs, &VisibilityConfig::default()).unwrap();
        let v = poly.vertices();
        assert_eq!(v.first(), Some(&piece.position));
        assert!((v[v.len() - 1] - piece.position).norm() < 1e-9);
        assert!(poly.area() > 0.0);
    }
}
