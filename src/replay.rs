//! Replay scripts
//!
//! A replay script is a recorded sequence of mode changes and pointer events.
//! Running one drives a [`ToolModeController`] over an in-memory surface,
//! which is how the tools are exercised without a real map.
//!
//! ```json
//! {
//!   "coordinates": { "lat": 37.5666, "lng": 126.9784 },
//!   "steps": [
//!     { "set_mode": "distance" },
//!     { "event": { "type": "click", "position": { "lat": 37.5666, "lng": 126.9784 } } },
//!     "clear_all"
//!   ]
//! }
//! ```

use anyhow::Context;
use mapmeasure_core::{LatLng, LocalProjection, PointerEvent, SurfaceError};
use mapmeasure_tools::{MeasurementReport, MemorySurface, ToolModeController, ToolOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Seoul City Hall, used when a script carries no coordinates
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.5666,
    lng: 126.9784,
};

/// One recorded interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayStep {
    /// Switch tools by name, `"none"` clears the mode
    SetMode(String),
    /// Pointer event from the map
    Event(PointerEvent),
    /// Press the delete button on the n-th finalized measurement still on the map
    Delete(usize),
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Where the map is centered
    #[serde(default)]
    pub coordinates: Option<LatLng>,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

/// What was left on the map after a replay
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub reports: Vec<MeasurementReport>,
    /// Overlays still on the surface, finalized and live
    pub overlays_on_map: usize,
    /// Set-mode steps that named no known tool
    pub rejected_modes: usize,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let script: Self = serde_json::from_str(json).context("Invalid replay script")?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("In {}", path.display()))
    }

    pub fn center(&self) -> LatLng {
        self.coordinates.unwrap_or(DEFAULT_CENTER)
    }

    /// Reject scripts whose center cannot be projected
    pub fn validate(&self) -> Result<(), SurfaceError> {
        let center = self.center();
        if !center.is_finite() || center.lat.abs() >= 90.0 {
            return Err(SurfaceError::InvalidGeometry {
                reason: format!("map center {} is not a usable coordinate", center),
            });
        }
        Ok(())
    }

    /// Built-in demo: one measurement per tool, a detour through the vendor
    /// polygon tool and a deleted measurement.
    pub fn demo() -> Self {
        let p = LocalProjection::new(DEFAULT_CENTER);
        let at = |x: f64, y: f64| p.from_meters(x, y);
        let mode = |name: &str| ReplayStep::SetMode(name.to_string());
        let click = |x, y| ReplayStep::Event(PointerEvent::click(at(x, y)));
        let hover = |x, y| ReplayStep::Event(PointerEvent::moved(at(x, y)));
        let finish = |x, y| ReplayStep::Event(PointerEvent::right_click(at(x, y)));

        let steps = vec![
            mode("distance"),
            click(0.0, 0.0),
            hover(300.0, 100.0),
            click(400.0, 0.0),
            click(400.0, 300.0),
            finish(400.0, 300.0),
            mode("circle_radius"),
            click(-200.0, -200.0),
            hover(100.0, -200.0),
            click(300.0, -200.0),
            mode("polygon"),
            click(0.0, 0.0),
            mode("area"),
            click(0.0, 0.0),
            click(200.0, 0.0),
            click(200.0, 150.0),
            hover(0.0, 150.0),
            click(0.0, 150.0),
            finish(0.0, 150.0),
            mode("distance"),
            click(0.0, 500.0),
            click(50.0, 500.0),
            finish(50.0, 500.0),
            ReplayStep::Delete(3),
            mode("none"),
        ];

        Self {
            coordinates: Some(DEFAULT_CENTER),
            steps,
        }
    }

    pub fn run(&self, options: ToolOptions) -> anyhow::Result<ReplayOutcome> {
        self.validate()?;
        let surface = MemorySurface::new(self.center());
        let mut controller = ToolModeController::with_surface(surface.clone(), options);
        let mut rejected_modes = 0;

        for (index, step) in self.steps.iter().enumerate() {
            debug!("Replay step {}: {:?}", index, step);
            match step {
                ReplayStep::SetMode(mode) => {
                    if controller.set_mode_str(mode).is_err() {
                        rejected_modes += 1;
                    }
                }
                ReplayStep::Event(event) => controller.handle_event(*event),
                ReplayStep::Delete(n) => {
                    let target = controller.measurements().get(*n).map(|m| m.id);
                    match target.and_then(|id| surface.bubble_for(id)) {
                        Some((bubble, _)) => {
                            surface.press_delete(bubble);
                        }
                        None => debug!("No measurement #{} to delete", n),
                    }
                }
                ReplayStep::ClearAll => {
                    controller.clear_all();
                }
            }
        }

        let reports: Vec<MeasurementReport> = controller
            .measurements()
            .iter()
            .map(|m| m.report())
            .collect();
        info!(
            "Replayed {} steps, {} measurements remain",
            self.steps.len(),
            reports.len()
        );

        Ok(ReplayOutcome {
            reports,
            overlays_on_map: surface.overlay_count(),
            rejected_modes,
        })
    }
}
