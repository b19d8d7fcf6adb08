//! Overlay styles
//!
//! Stroke and fill options handed to the map surface with every overlay.

use serde::{Deserialize, Serialize};

use crate::data::ToolKind;

const DISTANCE_COLOR: &str = "#ff0000";
const RADIUS_COLOR: &str = "#1e90ff";
const AREA_COLOR: &str = "#2e8b57";
const PREVIEW_COLOR: &str = "#ff0000";

/// Stroke and fill options for a map overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Stroke color as `#rrggbb`
    pub stroke_color: String,
    /// Stroke opacity in [0, 1]
    pub stroke_opacity: f32,
    /// Stroke weight in pixels
    pub stroke_weight: f32,
    /// Fill color as `#rrggbb`
    pub fill_color: String,
    /// Fill opacity in [0, 1]
    pub fill_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::solid(DISTANCE_COLOR)
    }
}

impl OverlayStyle {
    /// Opaque stroke with a light fill of the same color.
    pub fn solid(color: &str) -> Self {
        Self {
            stroke_color: color.to_string(),
            stroke_opacity: 1.0,
            stroke_weight: 3.0,
            fill_color: color.to_string(),
            fill_opacity: 0.2,
        }
    }

    /// Thin translucent stroke for previews.
    pub fn preview(color: &str) -> Self {
        Self {
            stroke_color: color.to_string(),
            stroke_opacity: 0.5,
            stroke_weight: 2.0,
            fill_color: color.to_string(),
            fill_opacity: 0.1,
        }
    }

    /// Default style of a tool family's finalized overlays.
    pub fn for_tool(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Distance => Self::solid(DISTANCE_COLOR),
            ToolKind::Radius => Self::solid(RADIUS_COLOR),
            ToolKind::Area => Self::solid(AREA_COLOR),
        }
    }

    /// Default style of rubber bands and live polygons.
    pub fn live_preview() -> Self {
        Self::preview(PREVIEW_COLOR)
    }

    /// Returns a description of the first invalid field, if any.
    pub fn problem(&self) -> Option<String> {
        for (name, color) in [
            ("stroke_color", &self.stroke_color),
            ("fill_color", &self.fill_color),
        ] {
            if !is_hex_color(color) {
                return Some(format!("{name} must be #rrggbb, got '{color}'"));
            }
        }
        for (name, opacity) in [
            ("stroke_opacity", self.stroke_opacity),
            ("fill_opacity", self.fill_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Some(format!("{name} must be within [0, 1], got {opacity}"));
            }
        }
        if !(self.stroke_weight.is_finite() && self.stroke_weight > 0.0) {
            return Some(format!(
                "stroke_weight must be > 0, got {}",
                self.stroke_weight
            ));
        }
        None
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
