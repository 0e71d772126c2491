//! Playfield layout: two stacked regions with a gap between them.
//!
//! Each region has a play rect (where pieces may be put) and a smaller
//! generation rect (where segments and the king are placed), inset by a
//! fraction of the playfield width.

use serde::{Deserialize, Serialize};

use super::config::{validate_region, PlacementError};
use crate::geom2::Rect;

/// Layout fractions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutCfg {
    /// Gap between the regions as a fraction of the playfield height.
    pub middle_padding: f64,
    /// Inset of the generation rect as a fraction of the playfield width.
    pub area_padding: f64,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            middle_padding: 0.02,
            area_padding: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub play: Rect,
    pub generation: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub bounds: Rect,
    pub top: Region,
    pub bottom: Region,
}

impl Playfield {
    pub fn new(bounds: Rect, cfg: LayoutCfg) -> Result<Self, PlacementError> {
        validate_region(&bounds)?;
        if !(0.0..1.0).contains(&cfg.middle_padding) {
            return Err(PlacementError::invalid("middle_padding must lie in [0, 1)"));
        }
        if !(0.0..0.5).contains(&cfg.area_padding) {
            return Err(PlacementError::invalid("area_padding must lie in [0, 0.5)"));
        }
        let half = bounds.height * (1.0 - cfg.middle_padding) / 2.0;
        let pad = cfg.area_padding * bounds.width;
        let top_play = Rect::new(bounds.min_x, bounds.min_y, bounds.width, half);
        let bottom_play = Rect::new(
            bounds.min_x,
            bounds.min_y + bounds.height * (cfg.middle_padding + (1.0 - cfg.middle_padding) / 2.0),
            bounds.width,
            half,
        );
        let field = Self {
            bounds,
            top: Region {
                play: top_play,
                generation: top_play.inset(pad),
            },
            bottom: Region {
                play: bottom_play,
                generation: bottom_play.inset(pad),
            },
        };
        validate_region(&field.top.generation)?;
        Ok(field)
    }

    pub fn region(&self, side: Side) -> &Region {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn regions_stack_with_gap() {
        let field = Playfield::new(Rect::new(20.0, 20.0, 400.0, 700.0), LayoutCfg::default()).unwrap();
        let half = 700.0 * 0.98 / 2.0;
        assert!((field.top.play.height - half).abs() < 1e-9);
        assert!((field.bottom.play.height - half).abs() < 1e-9);
        assert!((field.bottom.play.min_y - (20.0 + 700.0 * 0.51)).abs() < 1e-9);
        // gap of 2% between the two play rects
        assert!((field.bottom.play.min_y - field.top.play.max_y() - 14.0).abs() < 1e-9);
        assert!((field.bottom.play.max_y() - 720.0).abs() < 1e-9);
        // generation rects inset by 5% of the width
        assert_eq!(field.top.generation.min_x, 40.0);
        assert!((field.top.generation.width - 360.0).abs() < 1e-9);
        assert!((field.top.generation.height - (half - 40.0)).abs() < 1e-9);
        assert!(field.region(Side::Bottom).play.contains(vector![220.0, 600.0]));
        assert!(!field.region(Side::Top).play.contains(vector![220.0, 600.0]));
    }

    #[test]
    fn rejects_degenerate_layouts() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 700.0);
        let too_wide = LayoutCfg {
            area_padding: 0.6,
            ..LayoutCfg::default()
        };
        assert!(Playfield::new(bounds, too_wide).is_err());
        // padding eats the whole (short) region
        let short = Rect::new(0.0, 0.0, 400.0, 60.0);
        assert!(Playfield::new(short, LayoutCfg::default()).is_err());
        assert!(Playfield::new(Rect::new(0.0, 0.0, 0.0, 10.0), LayoutCfg::default()).is_err());
    }
}
