//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so hosts can log or replay them.

use serde::{Deserialize, Serialize};

use crate::data::{CancelReason, MeasurementId, ToolKind, ToolMode};
use crate::geo::LatLng;

/// Root event enum for everything the measurement tools announce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Mode selector changes
    Mode(ModeEvent),
    /// Drawing session progress
    Session(SessionEvent),
    /// Finalized measurement lifecycle
    Measurement(MeasurementEvent),
}

impl MapEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            MapEvent::Mode(_) => EventCategory::Mode,
            MapEvent::Session(_) => EventCategory::Session,
            MapEvent::Measurement(_) => EventCategory::Measurement,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            MapEvent::Mode(e) => e.description(),
            MapEvent::Session(e) => e.description(),
            MapEvent::Measurement(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Mode,
    Session,
    Measurement,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Mode => write!(f, "Mode"),
            EventCategory::Session => write!(f, "Session"),
            EventCategory::Measurement => write!(f, "Measurement"),
        }
    }
}

/// Mode selector events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModeEvent {
    Changed {
        from: Option<ToolMode>,
        to: Option<ToolMode>,
    },
}

impl ModeEvent {
    pub fn description(&self) -> String {
        match self {
            ModeEvent::Changed { from, to } => {
                format!("Mode changed: {} -> {}", mode_name(from), mode_name(to))
            }
        }
    }
}

fn mode_name(mode: &Option<ToolMode>) -> String {
    mode.map_or_else(|| "none".to_string(), |m| m.to_string())
}

/// Drawing session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// First vertex placed
    Started { tool: ToolKind, at: LatLng },
    /// Another vertex committed
    VertexAdded { tool: ToolKind, vertices: usize },
    /// Session discarded without a measurement
    Cancelled { tool: ToolKind, reason: CancelReason },
}

impl SessionEvent {
    pub fn description(&self) -> String {
        match self {
            SessionEvent::Started { tool, at } => format!("{} session started at {}", tool, at),
            SessionEvent::VertexAdded { tool, vertices } => {
                format!("{} session now has {} vertices", tool, vertices)
            }
            SessionEvent::Cancelled { tool, reason } => {
                format!("{} session cancelled ({})", tool, reason)
            }
        }
    }
}

/// Finalized measurement events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasurementEvent {
    Finalized {
        id: MeasurementId,
        tool: ToolKind,
        metric: f64,
    },
    Deleted {
        id: MeasurementId,
    },
    /// Global clear removed this many measurements
    Cleared {
        removed: usize,
    },
}

impl MeasurementEvent {
    pub fn description(&self) -> String {
        match self {
            MeasurementEvent::Finalized { id, tool, metric } => {
                format!("{} measurement {} finalized: {:.2}", tool, id, metric)
            }
            MeasurementEvent::Deleted { id } => format!("Measurement {} deleted", id),
            MeasurementEvent::Cleared { removed } => {
                format!("Cleared {} measurements", removed)
            }
        }
    }
}
