//! Field-of-view polygons for pieces among segment occluders.
//!
//! Purpose
//! - Given a piece (position, facing), a view radius `R` and half-aperture
//!   `α`, compute the region of the cone `[facing-α, facing+α]` of radius `R`
//!   that is not hidden behind any segment.
//! - The result is a closed boundary that starts and ends at the piece; parts
//!   of the window where nothing blocks the view are arcs of radius `R`.
//!
//! Notes
//! - Angles inside the sweep are relative to the facing direction, so the
//!   window never straddles the `±π` seam for `α < π`. Occluders crossing the
//!   backward ray are split there.
//! - Depth is resolved per angular slot at the slot bisector. Events include
//!   occluder endpoints, view-circle crossings and occluder/occluder
//!   crossings, so between events the nearest occluder cannot change.
//! - Occluders through the viewpoint are ignored by the polygon but still
//!   block `Piece::sees`.
//!
//! Code cross-refs: `geom2::{Line::intersect, segments_intersect}`

mod sight;
mod sweep;
mod types;
mod zbuffer;

pub use sweep::compute_visibility_polygon;
pub use types::{BoundaryEdge, Piece, VisibilityConfig, VisibilityError, VisibilityPolygon};
