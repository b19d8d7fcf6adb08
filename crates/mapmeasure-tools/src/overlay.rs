//! Overlay descriptions handed to the map surface.
//!
//! The tools never render anything themselves. They describe what should be
//! on the map with [`Overlay`] values and keep the [`OverlayId`] the surface
//! hands back so the overlay can later be updated or removed.

use std::fmt;

use mapmeasure_core::{LatLng, MeasurementId, OverlayStyle, UiCallback};

/// Handle of an overlay placed on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Kind of an [`Overlay`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Dot,
    Polyline,
    Circle,
    Polygon,
    Label,
    Bubble,
}

/// Something drawn on the map
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Small circular marker, optionally captioned
    Dot {
        position: LatLng,
        label: Option<String>,
        style: OverlayStyle,
    },
    Polyline {
        path: Vec<LatLng>,
        style: OverlayStyle,
    },
    Circle {
        center: LatLng,
        radius: f64,
        style: OverlayStyle,
    },
    Polygon {
        path: Vec<LatLng>,
        style: OverlayStyle,
    },
    /// Floating text that follows the pointer
    Label { position: LatLng, text: String },
    /// Result annotation with a delete button
    Bubble(AnnotationBubble),
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::Dot { .. } => OverlayKind::Dot,
            Overlay::Polyline { .. } => OverlayKind::Polyline,
            Overlay::Circle { .. } => OverlayKind::Circle,
            Overlay::Polygon { .. } => OverlayKind::Polygon,
            Overlay::Label { .. } => OverlayKind::Label,
            Overlay::Bubble(_) => OverlayKind::Bubble,
        }
    }

    /// Vertices of a path overlay, if this is one.
    pub fn path(&self) -> Option<&[LatLng]> {
        match self {
            Overlay::Polyline { path, .. } | Overlay::Polygon { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn as_bubble(&self) -> Option<&AnnotationBubble> {
        match self {
            Overlay::Bubble(bubble) => Some(bubble),
            _ => None,
        }
    }
}

/// One `label: value` row of an annotation bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLine {
    pub label: String,
    pub value: String,
}

impl AnnotationLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for AnnotationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Annotation shown next to a finalized measurement.
///
/// Carries the measurement's [`DeleteHandle`]; the surface calls it when the
/// user presses the bubble's delete button.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationBubble {
    pub position: LatLng,
    pub lines: Vec<AnnotationLine>,
    on_delete: DeleteHandle,
}

impl AnnotationBubble {
    pub fn new(position: LatLng, lines: Vec<AnnotationLine>, on_delete: DeleteHandle) -> Self {
        Self {
            position,
            lines,
            on_delete,
        }
    }

    /// Measurement this bubble annotates
    pub fn measurement_id(&self) -> MeasurementId {
        self.on_delete.measurement_id()
    }

    pub fn delete_handle(&self) -> &DeleteHandle {
        &self.on_delete
    }

    /// Rows joined by newlines, as they read in the bubble
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Value of the row with this label
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

/// Delete affordance of a finalized measurement.
///
/// Invoking it removes every overlay of the measurement, its bubble
/// included. Invoking it again, or after the measurement was cleared, does
/// nothing.
#[derive(Clone)]
pub struct DeleteHandle {
    id: MeasurementId,
    callback: UiCallback,
}

impl DeleteHandle {
    pub fn new(id: MeasurementId, callback: UiCallback) -> Self {
        Self { id, callback }
    }

    pub fn measurement_id(&self) -> MeasurementId {
        self.id
    }

    pub fn invoke(&self) {
        (self.callback)();
    }
}

impl PartialEq for DeleteHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for DeleteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteHandle").field("id", &self.id).finish()
    }
}
