//! Point-to-point line of sight.

use super::types::{Piece, VisibilityConfig, VisibilityError};
use crate::geom2::{bearing, segments_intersect, wrap_pi, GeomCfg, Point, Segment};

impl Piece {
    /// Whether `target` lies inside the view cone (within `view_radius` and
    /// `half_aperture` of the facing direction) with no occluder crossing the
    /// sight line.
    pub fn sees(
        &self,
        target: Point,
        segments: &[Segment],
        cfg: &VisibilityConfig,
    ) -> Result<bool, VisibilityError> {
        cfg.validate()?;
        self.validate()?;
        if !(target.x.is_finite() && target.y.is_finite()) {
            return Err(VisibilityError::piece("target must be finite"));
        }
        let d = self.distance(target);
        if d > cfg.view_radius {
            return Ok(false);
        }
        if d > 0.0 && wrap_pi(bearing(self.position, target) - self.facing).abs() > cfg.half_aperture {
            return Ok(false);
        }
        let geom = GeomCfg::default();
        let sight = Segment::new(self.position, target);
        Ok(!segments
            .iter()
            .any(|s| !s.is_degenerate() && segments_intersect(&sight, s, &geom)))
    }
}
