//! # MapMeasure Core
//!
//! Core types, formatting and events for the map measurement tools.
//! Provides the coordinate model, the tool-mode vocabulary, the geometry
//! formatter, overlay styles, the error taxonomy and the event bus.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod geo;
pub mod style;
pub mod types;
pub mod units;

pub use data::{
    CancelReason, MeasurementId, MeasurementShape, PointerEvent, PointerKind, ToolKind, ToolMode,
    VendorShape,
};

pub use error::{Error, Result, SurfaceError, ToolError};

pub use event_bus::{
    EventBus, EventBusConfig, EventCategory, EventFilter, MapEvent, MeasurementEvent, ModeEvent,
    SessionEvent, SubscriptionId,
};

pub use geo::{LatLng, LocalProjection};

pub use style::OverlayStyle;

pub use types::{shared, shared_vec, Shared, SharedVec, UiCallback, WeakShared};

pub use units::{
    format_area, format_distance, format_minutes, format_travel_time, travel_minutes,
    TravelEstimate, TravelSpeeds, CYCLING_METERS_PER_MINUTE, WALKING_METERS_PER_MINUTE,
};
