//! Bookkeeping for finalized measurements.
//!
//! The registry remembers, for every finalized measurement, exactly which
//! overlays belong to it. Deleting a measurement removes those overlays and
//! nothing else.

use chrono::{DateTime, Utc};
use mapmeasure_core::{LatLng, MeasurementId, MeasurementShape, ToolError, ToolKind};
use serde::Serialize;
use tracing::debug;

use crate::overlay::{AnnotationLine, DeleteHandle, OverlayId};
use crate::surface::MapSurface;

/// A measurement that outlived its drawing session
#[derive(Debug, Clone)]
pub struct FinalizedMeasurement {
    pub id: MeasurementId,
    pub tool: ToolKind,
    pub shape: MeasurementShape,
    /// Meters for distance and radius, square meters for area
    pub metric: f64,
    pub vertices: Vec<LatLng>,
    /// Geometry and marker overlays
    pub overlays: Vec<OverlayId>,
    /// The annotation bubble
    pub bubble: OverlayId,
    pub lines: Vec<AnnotationLine>,
    pub delete: DeleteHandle,
    pub created_at: DateTime<Utc>,
}

impl FinalizedMeasurement {
    /// Every overlay owned by this measurement, bubble included
    pub fn overlay_ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.overlays
            .iter()
            .copied()
            .chain(std::iter::once(self.bubble))
    }

    pub fn report(&self) -> MeasurementReport {
        MeasurementReport {
            id: self.id,
            tool: self.tool,
            shape: self.shape,
            metric: self.metric,
            vertices: self.vertices.clone(),
            annotation: self.lines.iter().map(ToString::to_string).collect(),
            created_at: self.created_at,
        }
    }
}

/// Serializable summary of a finalized measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementReport {
    pub id: MeasurementId,
    pub tool: ToolKind,
    pub shape: MeasurementShape,
    pub metric: f64,
    pub vertices: Vec<LatLng>,
    pub annotation: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Finalized measurements across all tool families, in creation order
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    entries: Vec<FinalizedMeasurement>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, measurement: FinalizedMeasurement) -> Result<(), ToolError> {
        if self.contains(measurement.id) {
            return Err(ToolError::DuplicateMeasurement {
                id: measurement.id.to_string(),
            });
        }
        self.entries.push(measurement);
        Ok(())
    }

    pub fn contains(&self, id: MeasurementId) -> bool {
        self.entries.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: MeasurementId) -> Option<&FinalizedMeasurement> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// Remove a measurement and all of its overlays.
    ///
    /// Returns false if `id` is unknown, which makes repeated deletion a no-op.
    pub fn delete(&mut self, id: MeasurementId, surface: &mut dyn MapSurface) -> bool {
        let Some(index) = self.entries.iter().position(|m| m.id == id) else {
            return false;
        };
        let measurement = self.entries.remove(index);
        let removed = Self::remove_overlays(&measurement, surface);
        debug!("Measurement {} removed {} overlays", id, removed);
        true
    }

    /// Remove every measurement. Returns the ids removed, oldest first.
    pub fn clear_all(&mut self, surface: &mut dyn MapSurface) -> Vec<MeasurementId> {
        self.entries
            .drain(..)
            .map(|measurement| {
                Self::remove_overlays(&measurement, surface);
                measurement.id
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_for(&self, tool: ToolKind) -> usize {
        self.entries.iter().filter(|m| m.tool == tool).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FinalizedMeasurement> {
        self.entries.iter()
    }

    fn remove_overlays(measurement: &FinalizedMeasurement, surface: &mut dyn MapSurface) -> usize {
        measurement
            .overlay_ids()
            .filter(|id| surface.remove_overlay(*id))
            .count()
    }
}
