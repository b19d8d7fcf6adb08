//! Error handling for MapMeasure
//!
//! The measurement subsystem performs no I/O of its own, so the taxonomy is
//! narrow:
//! - Tool errors (mode parsing, registry bookkeeping)
//! - Surface errors (map surface lifecycle)
//!
//! Invalid finalizes, double deletions and mode switches during a session are
//! state-machine transitions, not errors, and never show up here.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Tool error type
///
/// Raised by the mode selector and the overlay registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Mode string did not name a measurement tool or vendor shape
    #[error("Unknown tool mode: {mode}")]
    UnknownMode {
        /// The unrecognized mode string.
        mode: String,
    },

    /// A finalized measurement with this id is already registered
    #[error("Measurement {id} is already registered")]
    DuplicateMeasurement {
        /// The duplicated measurement id.
        id: String,
    },
}

/// Map surface error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// No map surface has been attached yet
    #[error("No map surface attached")]
    NotAttached,

    /// Geometry handed to the surface was unusable
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Why the geometry was rejected.
        reason: String,
    },
}

/// Main error type for MapMeasure
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool error
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Surface error
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl Error {
    /// Check if this is a tool error
    pub fn is_tool_error(&self) -> bool {
        matches!(self, Error::Tool(_))
    }

    /// Check if this is a surface error
    pub fn is_surface_error(&self) -> bool {
        matches!(self, Error::Surface(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
