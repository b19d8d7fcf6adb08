//! Incremental-geometry drawing sessions.
//!
//! All three measurement tools share one state machine:
//!
//! ```text
//! Idle --click--> Drawing --click/pointermove--> Drawing
//!                 Drawing --rightclick--> Idle   (finalize or cancel)
//! Idle --pointermove/rightclick--> Idle          (ignored)
//! ```
//!
//! A [`MeasureTool`] configures the machine: how a click is accepted, how the
//! live preview follows the pointer, when a finalize is valid and how the
//! result is annotated. [`MeasurementSession`] owns the state and runs each
//! event through a single transition function.
//!
//! Every overlay a session creates lives in its [`LiveOverlays`] until the
//! session leaves `Drawing`. On finalize the permanent part is handed over
//! in a [`CompletedSession`]; on any other exit all of it is removed.

mod area;
mod distance;
mod radius;

pub use area::AreaTool;
pub use distance::DistanceTool;
pub use radius::RadiusTool;

use mapmeasure_core::{
    format_distance, CancelReason, LatLng, PointerEvent, PointerKind, ToolKind, TravelEstimate,
};
use tracing::debug;

use crate::options::ToolOptions;
use crate::overlay::{AnnotationLine, Overlay, OverlayId};
use crate::surface::MapSurface;

/// Overlays owned by a drawing session
#[derive(Debug, Default)]
pub struct LiveOverlays {
    /// Committed geometry (polyline, circle or polygon)
    pub shape: Option<OverlayId>,
    /// Preview geometry following the pointer
    pub guide: Option<OverlayId>,
    /// Floating label at the pointer
    pub label: Option<OverlayId>,
    /// Anchor and center dots
    pub markers: Vec<OverlayId>,
}

impl LiveOverlays {
    pub fn len(&self) -> usize {
        [self.shape, self.guide, self.label]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
            + self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Show `overlay` in `slot`, creating it on first use.
    pub fn put(slot: &mut Option<OverlayId>, surface: &mut dyn MapSurface, overlay: Overlay) {
        if let Some(id) = *slot {
            if surface.update_overlay(id, overlay.clone()) {
                return;
            }
        }
        *slot = Some(surface.add_overlay(overlay));
    }

    /// Remove everything from the map. Returns how many overlays went.
    fn remove_all(&mut self, surface: &mut dyn MapSurface) -> usize {
        let ids: Vec<OverlayId> = [self.shape.take(), self.guide.take(), self.label.take()]
            .into_iter()
            .flatten()
            .chain(self.markers.drain(..))
            .collect();
        ids.into_iter()
            .filter(|id| surface.remove_overlay(*id))
            .count()
    }

    /// Remove the transient part and hand over the rest.
    fn keep_permanent(&mut self, surface: &mut dyn MapSurface, keep_guide: bool) -> Vec<OverlayId> {
        if let Some(label) = self.label.take() {
            surface.remove_overlay(label);
        }
        if !keep_guide {
            if let Some(guide) = self.guide.take() {
                surface.remove_overlay(guide);
            }
        }
        [self.shape.take(), self.guide.take()]
            .into_iter()
            .flatten()
            .chain(self.markers.drain(..))
            .collect()
    }
}

/// A session in progress
#[derive(Debug)]
pub struct Drawing {
    /// Committed vertices; never empty
    pub vertices: Vec<LatLng>,
    /// Last pointer position seen
    pub pointer: Option<LatLng>,
    /// Metric of the committed geometry
    pub committed: f64,
    pub overlays: LiveOverlays,
}

impl Drawing {
    fn new(first: LatLng) -> Self {
        Self {
            vertices: vec![first],
            pointer: None,
            committed: 0.0,
            overlays: LiveOverlays::default(),
        }
    }

    pub fn first_vertex(&self) -> LatLng {
        self.vertices[0]
    }

    pub fn last_vertex(&self) -> LatLng {
        self.vertices[self.vertices.len() - 1]
    }
}

/// Session state
#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Drawing(Drawing),
}

/// What a tool does with a click while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Keep drawing
    Continue,
    /// Try to finalize right away
    Finalize,
}

/// Configuration of the shared session state machine for one tool family.
pub trait MeasureTool {
    fn kind(&self) -> ToolKind;

    /// Create the live overlays for a session whose first vertex was just placed.
    fn begin(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions);

    /// Accept a click while drawing.
    fn click(
        &self,
        drawing: &mut Drawing,
        surface: &mut dyn MapSurface,
        at: LatLng,
        options: &ToolOptions,
    ) -> ClickOutcome;

    /// Update the live preview for the pointer at `drawing.pointer`.
    fn track(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions);

    /// Final metric of the committed geometry.
    fn measure(&self, drawing: &Drawing, surface: &dyn MapSurface) -> f64;

    /// Whether a session in this state may become a measurement.
    fn can_finalize(&self, drawing: &Drawing, metric: f64) -> bool;

    /// Whether the preview geometry is part of the finished measurement.
    fn keeps_guide(&self) -> bool {
        false
    }

    /// Where the result bubble goes.
    fn anchor(&self, drawing: &Drawing) -> LatLng {
        drawing.last_vertex()
    }

    /// Rows of the result bubble.
    fn annotate(&self, metric: f64, options: &ToolOptions) -> Vec<AnnotationLine>;
}

/// A session that finalized successfully
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSession {
    pub tool: ToolKind,
    pub vertices: Vec<LatLng>,
    pub metric: f64,
    /// Bubble position
    pub anchor: LatLng,
    /// Overlays that now belong to the measurement
    pub overlays: Vec<OverlayId>,
    pub lines: Vec<AnnotationLine>,
}

/// Result of feeding one pointer event to a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Event has no meaning in the current state
    Ignored,
    Started,
    /// Live preview updated
    Tracked,
    /// Click committed; the session now has this many vertices
    VertexAdded(usize),
    Cancelled(CancelReason),
    Completed(CompletedSession),
}

/// Drawing session of one measurement tool
pub struct MeasurementSession {
    tool: Box<dyn MeasureTool>,
    state: SessionState,
}

impl MeasurementSession {
    pub fn new(tool: Box<dyn MeasureTool>) -> Self {
        Self {
            tool,
            state: SessionState::Idle,
        }
    }

    /// Session running the built-in tool for `kind`
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Distance => Self::new(Box::new(DistanceTool)),
            ToolKind::Radius => Self::new(Box::new(RadiusTool)),
            ToolKind::Area => Self::new(Box::new(AreaTool)),
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing(_))
    }

    /// Committed vertices of the session in progress
    pub fn vertices(&self) -> &[LatLng] {
        match &self.state {
            SessionState::Idle => &[],
            SessionState::Drawing(drawing) => &drawing.vertices,
        }
    }

    /// Overlays currently owned by the session
    pub fn live_overlay_count(&self) -> usize {
        match &self.state {
            SessionState::Idle => 0,
            SessionState::Drawing(drawing) => drawing.overlays.len(),
        }
    }

    /// Feed a pointer event to the session.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        surface: &mut dyn MapSurface,
        options: &ToolOptions,
    ) -> SessionOutcome {
        let state = std::mem::take(&mut self.state);
        let (next, outcome) = self.step(state, event, surface, options);
        self.state = next;
        outcome
    }

    /// Abandon the session in progress, removing all of its overlays.
    ///
    /// Returns the number of overlays removed, or `None` if the session was
    /// idle.
    pub fn cancel(&mut self, surface: &mut dyn MapSurface, reason: CancelReason) -> Option<usize> {
        match std::mem::take(&mut self.state) {
            SessionState::Idle => None,
            SessionState::Drawing(mut drawing) => {
                let removed = drawing.overlays.remove_all(surface);
                debug!(
                    "{} session cancelled ({}), {} overlays removed",
                    self.kind(),
                    reason,
                    removed
                );
                Some(removed)
            }
        }
    }

    fn step(
        &self,
        state: SessionState,
        event: PointerEvent,
        surface: &mut dyn MapSurface,
        options: &ToolOptions,
    ) -> (SessionState, SessionOutcome) {
        match (state, event.kind) {
            (SessionState::Idle, PointerKind::Click) => {
                let mut drawing = Drawing::new(event.position);
                self.tool.begin(&mut drawing, surface, options);
                debug!("{} session started at {}", self.kind(), event.position);
                (SessionState::Drawing(drawing), SessionOutcome::Started)
            }
            (SessionState::Idle, _) => (SessionState::Idle, SessionOutcome::Ignored),
            (SessionState::Drawing(mut drawing), PointerKind::Click) => {
                match self.tool.click(&mut drawing, surface, event.position, options) {
                    ClickOutcome::Continue => {
                        let count = drawing.vertices.len();
                        (
                            SessionState::Drawing(drawing),
                            SessionOutcome::VertexAdded(count),
                        )
                    }
                    ClickOutcome::Finalize => self.finish(drawing, surface, options),
                }
            }
            (SessionState::Drawing(mut drawing), PointerKind::Move) => {
                drawing.pointer = Some(event.position);
                self.tool.track(&mut drawing, surface, options);
                (SessionState::Drawing(drawing), SessionOutcome::Tracked)
            }
            (SessionState::Drawing(drawing), PointerKind::RightClick) => {
                self.finish(drawing, surface, options)
            }
        }
    }

    fn finish(
        &self,
        mut drawing: Drawing,
        surface: &mut dyn MapSurface,
        options: &ToolOptions,
    ) -> (SessionState, SessionOutcome) {
        let metric = self.tool.measure(&drawing, surface);
        if !self.tool.can_finalize(&drawing, metric) {
            let removed = drawing.overlays.remove_all(surface);
            debug!(
                "{} session too short to finalize, {} overlays removed",
                self.kind(),
                removed
            );
            return (
                SessionState::Idle,
                SessionOutcome::Cancelled(CancelReason::Incomplete),
            );
        }

        let overlays = drawing
            .overlays
            .keep_permanent(surface, self.tool.keeps_guide());
        let completed = CompletedSession {
            tool: self.kind(),
            anchor: self.tool.anchor(&drawing),
            lines: self.tool.annotate(metric, options),
            vertices: std::mem::take(&mut drawing.vertices),
            metric,
            overlays,
        };
        (SessionState::Idle, SessionOutcome::Completed(completed))
    }
}

impl std::fmt::Debug for MeasurementSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasurementSession")
            .field("tool", &self.kind())
            .field("state", &self.state)
            .finish()
    }
}

/// Rows shared by the length-based tools
pub(crate) fn travel_lines(label: &str, meters: f64, options: &ToolOptions) -> Vec<AnnotationLine> {
    let estimate = TravelEstimate::from_distance(meters, &options.speeds);
    vec![
        AnnotationLine::new(label, format_distance(meters)),
        AnnotationLine::new("도보", estimate.walking()),
        AnnotationLine::new("자전거", estimate.cycling()),
    ]
}
