use crate::error::DiagramError;
use crate::geometry::limits;
use crate::model::{Rect, Vec2};
use serde::{Deserialize, Serialize};

pub const EXPORT_FILENAME: &str = "voronoi_cells.svg";
pub const EXPORT_MIME: &str = "image/svg+xml;charset=utf-8";

/// Host-tunable settings. Every field has a default so partial documents
/// such as `{"width": 1024}` deserialize; unknown fields are rejected. The
/// export filename and MIME type are fixed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    pub width: f32,
    pub height: f32,
    pub marker_radius: f32,
    /// Extra slack around a marker when picking without host hit-testing.
    pub pick_tolerance: f32,
    /// Overlay position relative to the pointer.
    pub tooltip_offset: Vec2,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfig {
            width: 800.0,
            height: 600.0,
            marker_radius: 5.0,
            pick_tolerance: 2.0,
            tooltip_offset: Vec2::new(10.0, -28.0),
        }
    }
}

impl DiagramConfig {
    pub fn with_bounds(width: f32, height: f32) -> Self {
        DiagramConfig { width, height, ..Default::default() }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), DiagramError> {
        if !limits::in_extent_bounds(self.width) || !limits::in_extent_bounds(self.height) {
            return Err(DiagramError::InvalidBounds {
                width: self.width,
                height: self.height,
                max: limits::EXTENT_MAX,
            });
        }
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 || self.marker_radius > limits::RADIUS_MAX {
            return Err(DiagramError::InvalidConfig(format!(
                "marker_radius must be in (0, {}], got {}",
                limits::RADIUS_MAX,
                self.marker_radius
            )));
        }
        if !self.pick_tolerance.is_finite() || self.pick_tolerance < 0.0 {
            return Err(DiagramError::InvalidConfig(format!(
                "pick_tolerance must be finite and >= 0, got {}",
                self.pick_tolerance
            )));
        }
        if !self.tooltip_offset.is_finite() {
            return Err(DiagramError::InvalidConfig("tooltip_offset must be finite".into()));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, DiagramError> {
        let cfg: DiagramConfig =
            serde_json::from_str(s).map_err(|e| DiagramError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
