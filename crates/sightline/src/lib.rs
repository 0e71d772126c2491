//! Segment-field generation and field-of-view polygons.
//!
//! Layout
//! - `geom2`: points, lines, segments, rects, intersection tests, replayable RNG.
//! - `placement`: random segment fields with spacing constraints, king
//!   placement, the two-region playfield and round generation.
//! - `visibility`: angular sweep producing the visible region of a piece.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Breaking changes are fine when they improve clarity; callers in this
//!   workspace (the CLI) move with the library.

pub mod api;
pub mod geom2;
pub mod placement;
pub mod visibility;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::GeomCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{GeomCfg, Line, Point, Rect, ReplayToken, Segment};
    pub use crate::placement::{
        generate_round, generate_segments, place_point, PlacementConfig, Playfield, Round,
    };
    pub use crate::visibility::{
        compute_visibility_polygon, Piece, VisibilityConfig, VisibilityPolygon,
    };
    pub use nalgebra::Vector2 as Vec2;
}
