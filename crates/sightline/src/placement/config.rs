//! Placement parameters, distance metric and errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom2::{Point, Rect, Segment};

/// Outer attempt budget per requested segment.
pub const ATTEMPTS_PER_SEGMENT: usize = 50;

/// How "distance from a point to a segment" is measured for separation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationMetric {
    /// True distance to the closest point of the segment.
    #[default]
    Clamped,
    /// Perpendicular distance to the infinite supporting line. Reproduces the
    /// legacy behaviour: points beyond an endpoint along the segment's
    /// extension count as close.
    Line,
}

impl SeparationMetric {
    #[inline]
    pub fn distance(self, segment: &Segment, p: Point) -> f64 {
        match self {
            Self::Clamped => segment.distance_to_point(p),
            Self::Line => segment.distance_to_line(p),
        }
    }
}

/// Error type shared by the placement entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementError {
    InvalidConfig { reason: String },
    InvalidRegion { reason: String },
}

impl PlacementError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn region(reason: impl Into<String>) -> Self {
        Self::InvalidRegion {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid placement config: {reason}"),
            Self::InvalidRegion { reason } => write!(f, "invalid placement region: {reason}"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Segment and king placement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub min_segment_length: f64,
    pub max_segment_length: f64,
    /// Minimum distance between any two segments, and between the king and
    /// any segment (plus `piece_radius`).
    pub min_separation: f64,
    pub segment_count: usize,
    /// Inner retry budget: directions tried per start point, and samples
    /// tried when placing the king.
    pub max_attempts: usize,
    /// Radius of the king marker, added to its clearance from segments.
    pub piece_radius: f64,
    pub separation_metric: SeparationMetric,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_segment_length: 75.0,
            max_segment_length: 200.0,
            min_separation: 20.0,
            segment_count: 4,
            max_attempts: 20,
            piece_radius: 0.0,
            separation_metric: SeparationMetric::Clamped,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), PlacementError> {
        let lengths = [
            ("min_segment_length", self.min_segment_length),
            ("max_segment_length", self.max_segment_length),
            ("min_separation", self.min_separation),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v <= 0.0 {
                return Err(PlacementError::invalid(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.min_segment_length > self.max_segment_length {
            return Err(PlacementError::invalid(
                "min_segment_length <= max_segment_length required",
            ));
        }
        if self.max_attempts == 0 {
            return Err(PlacementError::invalid("max_attempts must be > 0"));
        }
        if !self.piece_radius.is_finite() || self.piece_radius < 0.0 {
            return Err(PlacementError::invalid(
                "piece_radius must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Minimum distance from the king to every segment.
    #[inline]
    pub fn king_clearance(&self) -> f64 {
        self.piece_radius + self.min_separation
    }

    #[inline]
    pub fn outer_attempts(&self) -> usize {
        self.segment_count.saturating_mul(ATTEMPTS_PER_SEGMENT)
    }
}

pub(crate) fn validate_region(rect: &Rect) -> Result<(), PlacementError> {
    if rect.is_empty() {
        return Err(PlacementError::region(format!(
            "rect must be finite with positive area, got {}x{}",
            rect.width, rect.height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn default_is_valid() {
        assert!(PlacementConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_bounds() {
        let base = PlacementConfig::default();
        let swapped = PlacementConfig {
            min_segment_length: 300.0,
            ..base.clone()
        };
        assert!(matches!(
            swapped.validate(),
            Err(PlacementError::InvalidConfig { .. })
        ));
        let zero_sep = PlacementConfig {
            min_separation: 0.0,
            ..base.clone()
        };
        assert!(zero_sep.validate().is_err());
        let nan = PlacementConfig {
            max_segment_length: f64::NAN,
            ..base.clone()
        };
        assert!(nan.validate().is_err());
        let no_attempts = PlacementConfig {
            max_attempts: 0,
            ..base.clone()
        };
        assert!(no_attempts.validate().is_err());
        let negative_radius = PlacementConfig {
            piece_radius: -1.0,
            ..base
        };
        assert!(negative_radius.validate().is_err());
    }

    #[test]
    fn rejects_empty_region() {
        let err = validate_region(&Rect::new(0.0, 0.0, 0.0, 10.0)).unwrap_err();
        assert!(err.to_string().contains("positive area"));
        assert!(validate_region(&Rect::new(0.0, 0.0, 1.0, 1.0)).is_ok());
    }

    #[test]
    fn metrics_differ_beyond_endpoints() {
        let s = Segment::new(vector![0.0, 0.0], vector![10.0, 0.0]);
        let p = vector![15.0, 0.0];
        assert!((SeparationMetric::Clamped.distance(&s, p) - 5.0).abs() < 1e-12);
        assert!(SeparationMetric::Line.distance(&s, p).abs() < 1e-12);
    }

    #[test]
    fn config_loads_from_partial_json() {
        let cfg: PlacementConfig =
            serde_json::from_str(r#"{"segment_count": 6, "separation_metric": "line"}"#).unwrap();
        assert_eq!(cfg.segment_count, 6);
        assert_eq!(cfg.separation_metric, SeparationMetric::Line);
        assert_eq!(cfg.min_segment_length, 75.0);
    }
}
