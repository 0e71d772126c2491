//! Constrained random placement of segments and points inside rects.
//!
//! Purpose
//! - Populate a region with `segment_count` segments whose lengths are
//!   bounded and which keep `min_separation` from each other, then place a
//!   single "king" point clear of all of them.
//! - Keep every call self-contained: configuration and RNG are parameters,
//!   retry budgets bound the work, and running out of budget yields a short
//!   (or empty) result rather than an error.
//!
//! Errors are reserved for malformed input (`PlacementError`), checked
//! before any sampling.
//!
//! Code cross-refs: `geom2::{segments_intersect, Segment::distance_to_point}`,
//! `geom2::rand::ReplayToken`

mod config;
mod king;
mod layout;
mod round;
mod segments;
mod zones;

pub use config::{PlacementConfig, PlacementError, SeparationMetric, ATTEMPTS_PER_SEGMENT};
pub use king::{place_point, try_place_point};
pub use layout::{LayoutCfg, Playfield, Region, Side};
pub use round::{generate_region, generate_round, RegionRound, Round};
pub use segments::{conflicts, generate_segments, max_ray_length};
pub use zones::{exclusion_zones, is_valid_position, ExclusionZone, PositionRules};
