//! Tool mode controller.
//!
//! The controller is the single entry point a map host talks to. It owns the
//! mode selector, one drawing session per measurement tool, the registry of
//! finalized measurements and (once it exists) the map surface.
//!
//! ## Re-entrancy
//!
//! Delete buttons on annotation bubbles call back into the controller. Such
//! a callback can fire while the controller is in the middle of an
//! operation (a surface that dispatches synchronously, an event handler).
//! The callback holds only a weak reference to the controller state; if the
//! state is busy it queues the measurement id, and the queue is drained
//! before the running operation returns. Events are published only after
//! the state has been released, so handlers may call back in freely.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use mapmeasure_core::{
    shared_vec, CancelReason, Error, EventBus, EventBusConfig, MapEvent, MeasurementEvent,
    MeasurementId, ModeEvent, PointerEvent, Result, SessionEvent, Shared, SharedVec,
    SurfaceError, ToolKind, ToolMode, UiCallback, WeakShared,
};
use tracing::{debug, info, warn};

use crate::options::ToolOptions;
use crate::overlay::{AnnotationBubble, DeleteHandle, Overlay, OverlayId};
use crate::registry::{FinalizedMeasurement, OverlayRegistry};
use crate::session::{CompletedSession, MeasurementSession, SessionOutcome};
use crate::surface::MapSurface;

/// One session per tool family
#[derive(Debug)]
struct Sessions {
    distance: MeasurementSession,
    radius: MeasurementSession,
    area: MeasurementSession,
}

impl Sessions {
    fn new() -> Self {
        Self {
            distance: MeasurementSession::for_kind(ToolKind::Distance),
            radius: MeasurementSession::for_kind(ToolKind::Radius),
            area: MeasurementSession::for_kind(ToolKind::Area),
        }
    }

    fn get_mut(&mut self, kind: ToolKind) -> &mut MeasurementSession {
        match kind {
            ToolKind::Distance => &mut self.distance,
            ToolKind::Radius => &mut self.radius,
            ToolKind::Area => &mut self.area,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &MeasurementSession> {
        [&self.distance, &self.radius, &self.area].into_iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut MeasurementSession> {
        [&mut self.distance, &mut self.radius, &mut self.area].into_iter()
    }
}

struct ControllerState<S: MapSurface + 'static> {
    surface: Option<S>,
    mode: Option<ToolMode>,
    sessions: Sessions,
    registry: OverlayRegistry,
    options: ToolOptions,
    /// Events raised while the state was borrowed
    outbox: Vec<MapEvent>,
    this: WeakShared<ControllerState<S>>,
    deferred: SharedVec<MeasurementId>,
    events: Rc<EventBus>,
}

impl<S: MapSurface + 'static> ControllerState<S> {
    fn set_mode(&mut self, mode: Option<ToolMode>) {
        let previous = self.mode;
        self.cancel_sessions(CancelReason::ModeChanged);

        if let Some(surface) = self.surface.as_mut() {
            surface.cancel_drawing();
            surface.set_drawing_mode(mode.and_then(|m| m.vendor_shape()));
        }

        self.mode = mode;
        debug!(
            "Tool mode {} -> {}",
            previous.map_or_else(|| "none".to_string(), |m| m.to_string()),
            mode.map_or_else(|| "none".to_string(), |m| m.to_string())
        );
        self.outbox.push(MapEvent::Mode(ModeEvent::Changed {
            from: previous,
            to: mode,
        }));
    }

    fn cancel_sessions(&mut self, reason: CancelReason) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        for session in self.sessions.iter_mut() {
            if session.cancel(surface, reason).is_some() {
                self.outbox.push(MapEvent::Session(SessionEvent::Cancelled {
                    tool: session.kind(),
                    reason,
                }));
            }
        }
    }

    fn handle_event(&mut self, event: PointerEvent) {
        if !event.position.is_finite() {
            warn!("Ignoring pointer event with invalid position {:?}", event);
            return;
        }
        let Some(kind) = self.mode.and_then(|m| m.tool()) else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let outcome = self
            .sessions
            .get_mut(kind)
            .handle(event, surface, &self.options);

        match outcome {
            SessionOutcome::Ignored | SessionOutcome::Tracked => {}
            SessionOutcome::Started => {
                self.outbox.push(MapEvent::Session(SessionEvent::Started {
                    tool: kind,
                    at: event.position,
                }));
            }
            SessionOutcome::VertexAdded(vertices) => {
                self.outbox
                    .push(MapEvent::Session(SessionEvent::VertexAdded { tool: kind, vertices }));
            }
            SessionOutcome::Cancelled(reason) => {
                self.outbox
                    .push(MapEvent::Session(SessionEvent::Cancelled { tool: kind, reason }));
            }
            SessionOutcome::Completed(done) => self.finalize(done),
        }
    }

    fn finalize(&mut self, done: CompletedSession) {
        let id = MeasurementId::new();
        let delete = DeleteHandle::new(id, self.delete_callback(id));
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let bubble = surface.add_overlay(Overlay::Bubble(AnnotationBubble::new(
            done.anchor,
            done.lines.clone(),
            delete.clone(),
        )));
        let measurement = FinalizedMeasurement {
            id,
            tool: done.tool,
            shape: done.tool.shape(),
            metric: done.metric,
            vertices: done.vertices,
            overlays: done.overlays,
            bubble,
            lines: done.lines,
            delete,
            created_at: Utc::now(),
        };
        let owned: Vec<OverlayId> = measurement.overlay_ids().collect();
        let summary = measurement
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        if let Err(err) = self.registry.register(measurement) {
            warn!("Discarding measurement: {}", err);
            for overlay in owned {
                surface.remove_overlay(overlay);
            }
            return;
        }

        info!("{} measurement {} finalized ({})", done.tool, id, summary);
        self.outbox
            .push(MapEvent::Measurement(MeasurementEvent::Finalized {
                id,
                tool: done.tool,
                metric: done.metric,
            }));
    }

    fn delete_measurement(&mut self, id: MeasurementId) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !self.registry.delete(id, surface) {
            debug!("Measurement {} already deleted", id);
            return false;
        }
        info!("Measurement {} deleted", id);
        self.outbox
            .push(MapEvent::Measurement(MeasurementEvent::Deleted { id }));
        true
    }

    fn clear_all(&mut self) -> usize {
        self.cancel_sessions(CancelReason::Cleared);
        let Some(surface) = self.surface.as_mut() else {
            return 0;
        };

        let removed = self.registry.clear_all(surface);
        surface.cancel_drawing();
        surface.clear_drawn_shapes();

        for id in &removed {
            self.outbox
                .push(MapEvent::Measurement(MeasurementEvent::Deleted { id: *id }));
        }
        self.outbox
            .push(MapEvent::Measurement(MeasurementEvent::Cleared {
                removed: removed.len(),
            }));
        info!("Cleared {} measurements", removed.len());
        removed.len()
    }

    /// Full cleanup, then hand the surface back with the vendor manager disarmed.
    fn release_surface(&mut self) -> Option<S> {
        self.clear_all();
        let mut surface = self.surface.take()?;
        surface.set_drawing_mode(None);
        Some(surface)
    }

    fn delete_callback(&self, id: MeasurementId) -> UiCallback {
        let this = self.this.clone();
        let deferred = Rc::clone(&self.deferred);

        Rc::new(move || {
            let Some(state) = this.upgrade() else {
                return;
            };
            let Ok(mut guard) = state.try_borrow_mut() else {
                debug!("Controller busy, deferring deletion of {}", id);
                deferred.borrow_mut().push(id);
                return;
            };
            guard.delete_measurement(id);
            let pending = std::mem::take(&mut guard.outbox);
            let events = Rc::clone(&guard.events);
            drop(guard);
            for event in pending {
                events.publish(event);
            }
        })
    }
}

/// Drives the measurement tools on one map.
///
/// Exactly one of {distance, radius, area, vendor shape drawing} is active
/// at a time. Without a surface every operation is a no-op.
///
/// # Example
/// ```rust,ignore
/// let mut controller = ToolModeController::new(ToolOptions::default());
/// controller.attach_surface(MemorySurface::new(center));
/// controller.set_mode(Some(ToolMode::Distance));
/// controller.handle_event(PointerEvent::click(a));
/// controller.handle_event(PointerEvent::click(b));
/// controller.handle_event(PointerEvent::right_click(b));
/// assert_eq!(controller.measurement_count(), 1);
/// ```
pub struct ToolModeController<S: MapSurface + 'static> {
    state: Shared<ControllerState<S>>,
    deferred: SharedVec<MeasurementId>,
    events: Rc<EventBus>,
}

impl<S: MapSurface + 'static> ToolModeController<S> {
    pub fn new(options: ToolOptions) -> Self {
        Self::with_event_config(options, EventBusConfig::default())
    }

    /// Controller whose event bus uses `config`
    pub fn with_event_config(options: ToolOptions, config: EventBusConfig) -> Self {
        let deferred: SharedVec<MeasurementId> = shared_vec();
        let events = Rc::new(EventBus::with_config(config));
        let state = Rc::new_cyclic(|this| {
            RefCell::new(ControllerState {
                surface: None,
                mode: None,
                sessions: Sessions::new(),
                registry: OverlayRegistry::new(),
                options,
                outbox: Vec::new(),
                this: this.clone(),
                deferred: Rc::clone(&deferred),
                events: Rc::clone(&events),
            })
        });
        Self {
            state,
            deferred,
            events,
        }
    }

    /// Controller with `surface` already attached
    pub fn with_surface(surface: S, options: ToolOptions) -> Self {
        let mut controller = Self::new(options);
        controller.attach_surface(surface);
        controller
    }

    /// Attach the map surface.
    ///
    /// A previously attached surface is cleaned up and dropped first.
    pub fn attach_surface(&mut self, mut surface: S) {
        {
            let mut state = self.state.borrow_mut();
            if state.release_surface().is_some() {
                debug!("Replacing attached map surface");
            }
            surface.set_drawing_mode(state.mode.and_then(|m| m.vendor_shape()));
            state.surface = Some(surface);
        }
        info!("Map surface attached");
        self.flush();
    }

    /// Remove everything from the surface and hand it back.
    pub fn detach_surface(&mut self) -> Result<S> {
        let surface = self.state.borrow_mut().release_surface();
        self.flush();
        match surface {
            Some(surface) => {
                info!("Map surface detached");
                Ok(surface)
            }
            None => Err(Error::Surface(SurfaceError::NotAttached)),
        }
    }

    pub fn has_surface(&self) -> bool {
        self.state.borrow().surface.is_some()
    }

    /// Switch tools. Any session in progress is cancelled.
    pub fn set_mode(&mut self, mode: Option<ToolMode>) {
        self.state.borrow_mut().set_mode(mode);
        self.flush();
    }

    /// Switch tools by name; `"none"` or an empty string clears the mode.
    pub fn set_mode_str(&mut self, mode: &str) -> Result<()> {
        let trimmed = mode.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            self.set_mode(None);
            return Ok(());
        }
        match trimmed.parse::<ToolMode>() {
            Ok(parsed) => {
                self.set_mode(Some(parsed));
                Ok(())
            }
            Err(err) => {
                warn!("Rejected tool mode: {}", err);
                Err(err.into())
            }
        }
    }

    pub fn mode(&self) -> Option<ToolMode> {
        self.state.borrow().mode
    }

    /// Measurement tool driven by the current mode
    pub fn active_tool(&self) -> Option<ToolKind> {
        self.mode().and_then(|m| m.tool())
    }

    /// Feed a pointer event from the map to the active tool.
    pub fn handle_event(&mut self, event: PointerEvent) {
        self.state.borrow_mut().handle_event(event);
        self.flush();
    }

    /// Delete every measurement, cancel any session and reset the vendor
    /// drawing manager. The mode is kept.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.state.borrow_mut().clear_all();
        self.flush();
        removed
    }

    /// Delete one measurement. Returns false if it was already gone.
    pub fn delete_measurement(&mut self, id: MeasurementId) -> bool {
        let deleted = self.state.borrow_mut().delete_measurement(id);
        self.flush();
        deleted
    }

    /// Delete affordance of a measurement, as attached to its bubble
    pub fn delete_handle(&self, id: MeasurementId) -> Option<DeleteHandle> {
        self.state
            .borrow()
            .registry
            .get(id)
            .map(|m| m.delete.clone())
    }

    /// Snapshot of the finalized measurements, oldest first
    pub fn measurements(&self) -> Vec<FinalizedMeasurement> {
        self.state.borrow().registry.iter().cloned().collect()
    }

    pub fn measurement(&self, id: MeasurementId) -> Option<FinalizedMeasurement> {
        self.state.borrow().registry.get(id).cloned()
    }

    pub fn measurement_count(&self) -> usize {
        self.state.borrow().registry.len()
    }

    /// Whether any tool has a session in progress
    pub fn is_drawing(&self) -> bool {
        self.state.borrow().sessions.iter().any(|s| s.is_drawing())
    }

    /// Overlays owned by sessions in progress
    pub fn live_overlay_count(&self) -> usize {
        self.state
            .borrow()
            .sessions
            .iter()
            .map(|s| s.live_overlay_count())
            .sum()
    }

    pub fn options(&self) -> ToolOptions {
        self.state.borrow().options.clone()
    }

    /// Replace the options. Takes effect from the next pointer event.
    pub fn set_options(&mut self, options: ToolOptions) {
        self.state.borrow_mut().options = options;
    }

    /// Bus on which this controller announces mode, session and
    /// measurement events
    pub fn events(&self) -> &Rc<EventBus> {
        &self.events
    }

    /// Run queued deletions and publish pending events until both are
    /// exhausted.
    fn flush(&self) {
        loop {
            let pending = {
                let Ok(mut state) = self.state.try_borrow_mut() else {
                    return;
                };
                let queued: Vec<MeasurementId> = self.deferred.borrow_mut().drain(..).collect();
                for id in queued {
                    debug!("Running deferred deletion of {}", id);
                    state.delete_measurement(id);
                }
                std::mem::take(&mut state.outbox)
            };
            if pending.is_empty() && self.deferred.borrow().is_empty() {
                break;
            }
            for event in pending {
                self.events.publish(event);
            }
        }
    }
}

impl<S: MapSurface + 'static> Drop for ToolModeController<S> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if let Some(surface) = state.release_surface() {
                debug!("Controller dropped, map surface released");
                drop(surface);
            }
        }
        self.flush();
    }
}

impl<S: MapSurface + 'static> std::fmt::Debug for ToolModeController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.try_borrow();
        let mut s = f.debug_struct("ToolModeController");
        if let Ok(state) = state {
            s.field("mode", &state.mode)
                .field("surface_attached", &state.surface.is_some())
                .field("measurements", &state.registry.len())
                .field("sessions", &state.sessions);
        }
        s.field("events", &self.events).finish()
    }
}
