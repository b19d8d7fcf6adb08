//! # MapMeasure Tools
//!
//! Interactive measurement tools for a map view: distance along a polyline,
//! radius of a circle and area of a polygon, plus arbitration with the map
//! vendor's own shape drawing.
//!
//! ## Architecture
//!
//! ```text
//! ToolModeController (mode selector, entry point)
//!   ├── MeasurementSession x3 (distance, radius, area)
//!   │     └── LiveOverlays (dots, rubber band, floating label)
//!   ├── OverlayRegistry (finalized measurements + delete handles)
//!   ├── EventBus (mode/session/measurement events)
//!   └── MapSurface (rendering and geodesy, supplied by the host)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mapmeasure_tools::{MemorySurface, ToolModeController, ToolOptions};
//! use mapmeasure_core::{LatLng, PointerEvent, ToolMode};
//!
//! let surface = MemorySurface::new(LatLng::new(37.5665, 126.978));
//! let mut controller = ToolModeController::with_surface(surface, ToolOptions::default());
//! controller.set_mode(Some(ToolMode::Area));
//! ```

pub mod controller;
pub mod options;
pub mod overlay;
pub mod registry;
pub mod session;
pub mod surface;

pub use controller::ToolModeController;
pub use options::{ToolOptions, ToolStyles};
pub use overlay::{AnnotationBubble, AnnotationLine, DeleteHandle, Overlay, OverlayId, OverlayKind};
pub use registry::{FinalizedMeasurement, MeasurementReport, OverlayRegistry};
pub use session::{
    AreaTool, ClickOutcome, CompletedSession, DistanceTool, Drawing, LiveOverlays, MeasureTool,
    MeasurementSession, RadiusTool, SessionOutcome, SessionState,
};
pub use surface::{MapSurface, MemorySurface};
