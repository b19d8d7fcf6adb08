//! Data models shared by the measurement tools and their host
//!
//! This module provides:
//! - Tool families and the mode selector vocabulary
//! - Pointer events delivered by the map surface
//! - Measurement identifiers and shapes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ToolError;
use crate::geo::LatLng;

/// Measurement tool family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Polyline length
    Distance,
    /// Circle radius
    Radius,
    /// Polygon area
    Area,
}

impl ToolKind {
    /// Shape of the measurements this tool produces
    pub fn shape(&self) -> MeasurementShape {
        match self {
            ToolKind::Distance => MeasurementShape::Polyline,
            ToolKind::Radius => MeasurementShape::Circle,
            ToolKind::Area => MeasurementShape::Polygon,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::Distance => write!(f, "distance"),
            ToolKind::Radius => write!(f, "radius"),
            ToolKind::Area => write!(f, "area"),
        }
    }
}

/// Geometry of a finalized measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementShape {
    Polyline,
    Circle,
    Polygon,
}

/// Shapes offered by the map vendor's own drawing manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorShape {
    Marker,
    Circle,
    Polygon,
    Polyline,
    Rectangle,
}

impl VendorShape {
    fn as_str(&self) -> &'static str {
        match self {
            VendorShape::Marker => "marker",
            VendorShape::Circle => "circle",
            VendorShape::Polygon => "polygon",
            VendorShape::Polyline => "polyline",
            VendorShape::Rectangle => "rectangle",
        }
    }
}

/// Active tool mode.
///
/// The host holds an `Option<ToolMode>`; `None` means no tool is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ToolMode {
    Distance,
    CircleRadius,
    Area,
    /// Vendor shape-drawing mode
    Shape(VendorShape),
}

impl ToolMode {
    /// The measurement tool this mode drives, if it is not a vendor mode.
    pub fn tool(&self) -> Option<ToolKind> {
        match self {
            ToolMode::Distance => Some(ToolKind::Distance),
            ToolMode::CircleRadius => Some(ToolKind::Radius),
            ToolMode::Area => Some(ToolKind::Area),
            ToolMode::Shape(_) => None,
        }
    }

    /// The vendor shape this mode arms, if any.
    pub fn vendor_shape(&self) -> Option<VendorShape> {
        match self {
            ToolMode::Shape(shape) => Some(*shape),
            _ => None,
        }
    }
}

impl From<ToolKind> for ToolMode {
    fn from(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Distance => ToolMode::Distance,
            ToolKind::Radius => ToolMode::CircleRadius,
            ToolKind::Area => ToolMode::Area,
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolMode::Distance => write!(f, "distance"),
            ToolMode::CircleRadius => write!(f, "circle_radius"),
            ToolMode::Area => write!(f, "area"),
            ToolMode::Shape(shape) => write!(f, "{}", shape.as_str()),
        }
    }
}

impl FromStr for ToolMode {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(ToolMode::Distance),
            "circle_radius" | "radius" => Ok(ToolMode::CircleRadius),
            "area" => Ok(ToolMode::Area),
            "marker" => Ok(ToolMode::Shape(VendorShape::Marker)),
            "circle" => Ok(ToolMode::Shape(VendorShape::Circle)),
            "polygon" => Ok(ToolMode::Shape(VendorShape::Polygon)),
            "polyline" => Ok(ToolMode::Shape(VendorShape::Polyline)),
            "rectangle" => Ok(ToolMode::Shape(VendorShape::Rectangle)),
            _ => Err(ToolError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ToolMode {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToolMode> for String {
    fn from(mode: ToolMode) -> Self {
        mode.to_string()
    }
}

/// Kind of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Click,
    #[serde(rename = "pointermove", alias = "move")]
    Move,
    #[serde(rename = "rightclick")]
    RightClick,
}

/// Pointer event delivered by the map surface in geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    #[serde(rename = "type")]
    pub kind: PointerKind,
    pub position: LatLng,
}

impl PointerEvent {
    pub fn click(position: LatLng) -> Self {
        Self {
            kind: PointerKind::Click,
            position,
        }
    }

    pub fn moved(position: LatLng) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
        }
    }

    pub fn right_click(position: LatLng) -> Self {
        Self {
            kind: PointerKind::RightClick,
            position,
        }
    }
}

/// Unique identifier of a finalized measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasurementId(Uuid);

impl MeasurementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MeasurementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M({})", &self.0.to_string()[..8])
    }
}

/// Why a drawing session ended without a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Finalize requested with too few vertices or a zero radius
    Incomplete,
    /// Mode selector moved away from the tool
    ModeChanged,
    /// Global clear or surface teardown
    Cleared,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Incomplete => write!(f, "incomplete"),
            CancelReason::ModeChanged => write!(f, "mode changed"),
            CancelReason::Cleared => write!(f, "cleared"),
        }
    }
}
