//! One round: both regions populated with segments and a king.
//!
//! Each region draws from its own child stream of the round's replay token,
//! so regions are independent and a `(seed, index)` pair regenerates the
//! whole round.

use serde::{Deserialize, Serialize};

use super::config::{PlacementConfig, PlacementError};
use super::king::try_place_point;
use super::layout::{Playfield, Region, Side};
use super::segments::generate_segments;
use crate::geom2::{Point, ReplayToken, Segment};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionRound {
    pub side: Side,
    pub region: Region,
    pub segments: Vec<Segment>,
    /// `None` when king placement ran out of attempts.
    pub king: Option<Point>,
    pub replay: ReplayToken,
}

impl RegionRound {
    /// All requested segments were produced and the king was placed.
    pub fn is_complete(&self, cfg: &PlacementConfig) -> bool {
        self.segments.len() == cfg.segment_count && self.king.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub replay: ReplayToken,
    pub top: RegionRound,
    pub bottom: RegionRound,
}

impl Round {
    /// Occluders for visibility: segments of both regions, top first.
    pub fn all_segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.top.segments.len() + self.bottom.segments.len());
        out.extend_from_slice(&self.top.segments);
        out.extend_from_slice(&self.bottom.segments);
        out
    }

    pub fn region(&self, side: Side) -> &RegionRound {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }
}

/// Populate one region from `token`.
pub fn generate_region(
    side: Side,
    region: Region,
    cfg: &PlacementConfig,
    token: ReplayToken,
) -> Result<RegionRound, PlacementError> {
    let mut rng = token.to_std_rng();
    let segments = generate_segments(&region.generation, cfg, &mut rng)?;
    let king = try_place_point(&segments, &region.generation, cfg, &mut rng)?;
    Ok(RegionRound {
        side,
        region,
        segments,
        king,
        replay: token,
    })
}

/// Populate both regions of `field`.
pub fn generate_round(
    field: &Playfield,
    cfg: &PlacementConfig,
    token: ReplayToken,
) -> Result<Round, PlacementError> {
    let top = generate_region(Side::Top, field.top, cfg, token.child(0))?;
    let bottom = generate_region(Side::Bottom, field.bottom, cfg, token.child(1))?;
    tracing::debug!(
        seed = token.seed,
        index = token.index,
        top = top.segments.len(),
        bottom = bottom.segments.len(),
        "round generated"
    );
    Ok(Round {
        replay: token,
        top,
        bottom,
    })
}
