//! Runtime options for the measurement tools.

use mapmeasure_core::{OverlayStyle, ToolKind, TravelSpeeds};

/// Styles for each tool family plus the live previews
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStyles {
    pub distance: OverlayStyle,
    pub radius: OverlayStyle,
    pub area: OverlayStyle,
    /// Rubber band, radius line and live polygon
    pub preview: OverlayStyle,
}

impl Default for ToolStyles {
    fn default() -> Self {
        Self {
            distance: OverlayStyle::for_tool(ToolKind::Distance),
            radius: OverlayStyle::for_tool(ToolKind::Radius),
            area: OverlayStyle::for_tool(ToolKind::Area),
            preview: OverlayStyle::live_preview(),
        }
    }
}

/// Options shared by all measurement sessions of a controller
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOptions {
    pub speeds: TravelSpeeds,
    pub styles: ToolStyles,
    /// Caption distance anchor dots with the segment length
    pub show_segment_lengths: bool,
    /// Show the floating label that follows the pointer
    pub show_live_label: bool,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            speeds: TravelSpeeds::default(),
            styles: ToolStyles::default(),
            show_segment_lengths: true,
            show_live_label: true,
        }
    }
}
