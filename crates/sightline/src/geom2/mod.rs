//! 2D geometry primitives.
//!
//! Purpose
//! - Points, infinite lines, bounded segments and axis-aligned rects as plain
//!   values, with the predicates placement and visibility are built on:
//!   line intersection, segment intersection, containment, line and segment
//!   distance, bearings.
//! - Keep every routine total: parallel lines give `None`, degenerate
//!   segments never panic.
//!
//! Code cross-refs: `placement::generate_segments`, `visibility::compute_visibility_polygon`

mod intersect;
pub mod rand;
mod types;
mod util;

pub use intersect::{intersect, segments_intersect};
pub use rand::ReplayToken;
pub use types::{GeomCfg, Line, Point, Rect, Segment};
pub use util::{angle_from_origin, bearing, cross, normalize_angle, unit, wrap_pi};
