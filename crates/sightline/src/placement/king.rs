//! King placement: a single point clear of every segment.

use rand::Rng;

use super::config::{validate_region, PlacementConfig, PlacementError};
use crate::geom2::rand::sample_point;
use crate::geom2::{Point, Rect, Segment};

/// Sample up to `cfg.max_attempts` points in `rect`; return the first whose
/// distance to every segment is at least `cfg.king_clearance()`.
///
/// `Ok(None)` means the retry budget ran out.
pub fn try_place_point<R: Rng + ?Sized>(
    segments: &[Segment],
    rect: &Rect,
    cfg: &PlacementConfig,
    rng: &mut R,
) -> Result<Option<Point>, PlacementError> {
    validate_region(rect)?;
    cfg.validate()?;
    let clearance = cfg.king_clearance();
    for _ in 0..cfg.max_attempts {
        let p = sample_point(rect, rng);
        if is_clear(p, segments, clearance, cfg) {
            return Ok(Some(p));
        }
    }
    tracing::debug!(
        attempts = cfg.max_attempts,
        segments = segments.len(),
        clearance,
        "king placement exhausted"
    );
    Ok(None)
}

/// Like `try_place_point`, but returns the origin `(0, 0)` when no point was
/// found. The sentinel can coincide with a legitimate placement if `rect`
/// contains the origin; prefer `try_place_point` when that matters.
pub fn place_point<R: Rng + ?Sized>(
    segments: &[Segment],
    rect: &Rect,
    cfg: &PlacementConfig,
    rng: &mut R,
) -> Result<Point, PlacementError> {
    Ok(try_place_point(segments, rect, cfg, rng)?.unwrap_or_else(Point::zeros))
}

fn is_clear(p: Point, segments: &[Segment], clearance: f64, cfg: &PlacementConfig) -> bool {
    segments
        .iter()
        .all(|s| cfg.separation_metric.distance(s, p) >= clearance)
}
