use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sightline::api::{LayoutCfg, PlacementConfig, Playfield, Rect, VisibilityConfig};
use std::fs;
use std::path::Path;

/// `--config` document. Every section and field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub placement: PlacementConfig,
    pub visibility: VisibilityConfig,
    pub layout: LayoutCfg,
}

impl RunConfig {
    /// Defaults when `path` is `None`; otherwise parse and validate the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(p) => {
                let bytes = fs::read(p).with_context(|| format!("reading config {}", p.display()))?;
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("parsing config {}", p.display()))?
            }
            None => Self::default(),
        };
        cfg.placement.validate()?;
        cfg.visibility.validate()?;
        Ok(cfg)
    }

    pub fn playfield(&self, width: f64, height: f64) -> Result<Playfield> {
        Playfield::new(Rect::new(0.0, 0.0, width, height), self.layout)
            .with_context(|| format!("laying out a {width}x{height} playfield"))
    }
}
