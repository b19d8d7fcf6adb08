//! # MapMeasure
//!
//! Interactive measurement and annotation tools for a map view:
//! - Distance along a clicked polyline, with walking and cycling estimates
//! - Radius of a dragged circle, with the same estimates
//! - Area of a clicked polygon
//! - Arbitration with the map vendor's own shape drawing
//!
//! ## Architecture
//!
//! MapMeasure is organized as a workspace with multiple crates:
//!
//! 1. **mapmeasure-core** - Coordinates, tool modes, formatting, errors, events
//! 2. **mapmeasure-tools** - Measurement sessions, overlay registry, controller
//! 3. **mapmeasure-settings** - Configuration files and persistence
//! 4. **mapmeasure** - Replay binary that drives the controller from a script

pub mod cli;
pub mod replay;

pub use mapmeasure_core::{
    format_area, format_distance, format_travel_time, Error, EventBus, LatLng, MapEvent,
    MeasurementId, PointerEvent, Result, ToolKind, ToolMode, TravelSpeeds, VendorShape,
};

pub use mapmeasure_settings::{Config, SettingsPersistence};

pub use mapmeasure_tools::{
    FinalizedMeasurement, MapSurface, MeasurementReport, MemorySurface, ToolModeController,
    ToolOptions, ToolStyles,
};

pub use replay::{ReplayScript, ReplayStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the measurement output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Runtime options for the controller from a loaded configuration
pub fn tool_options(config: &Config) -> ToolOptions {
    ToolOptions {
        speeds: config.travel,
        styles: ToolStyles {
            distance: config.styles.distance.clone(),
            radius: config.styles.radius.clone(),
            area: config.styles.area.clone(),
            preview: config.styles.preview.clone(),
        },
        show_segment_lengths: config.labels.show_segment_lengths,
        show_live_label: config.labels.show_live_label,
    }
}
