use std::cell::RefCell;
use std::rc::Rc;

use mapmeasure_core::{
    CancelReason, EventBusConfig, EventCategory, EventFilter, LatLng, MapEvent, MeasurementEvent,
    ModeEvent, PointerEvent, SessionEvent, ToolKind, ToolMode, VendorShape,
};
use mapmeasure_tools::{
    DeleteHandle, MapSurface, MemorySurface, Overlay, OverlayId, ToolModeController, ToolOptions,
};

use crate::common::{seoul, Harness};

#[test]
fn test_stale_moves_after_finalize_are_ignored() {
    let mut h = Harness::new();
    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.click(25.0, 0.0);
    h.right_click(25.0, 0.0);
    let settled = h.surface.overlays();

    for x in [30.0, 35.0, 40.0] {
        h.move_to(x, 5.0);
    }
    h.right_click(40.0, 5.0);

    assert_eq!(h.surface.overlays(), settled);
    assert!(!h.controller.is_drawing());
    assert_eq!(h.controller.measurement_count(), 1);
}

#[test]
fn test_delete_from_event_handler() {
    let mut h = Harness::new();
    let surface = h.surface.clone();
    h.controller.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Measurement]),
        move |event| {
            if let MapEvent::Measurement(MeasurementEvent::Finalized { id, .. }) = event {
                if let Some((bubble, _)) = surface.bubble_for(*id) {
                    surface.press_delete(bubble);
                }
            }
        },
    );

    h.mode(ToolMode::Area);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.click(10.0, 10.0);
    h.right_click(10.0, 10.0);

    assert_eq!(h.controller.measurement_count(), 0);
    assert_eq!(h.surface.overlay_count(), 0);
}

/// Surface that presses a delete button from inside `add_overlay`, the way
/// a synchronously dispatching map SDK might.
struct EagerSurface {
    inner: MemorySurface,
    pending: Rc<RefCell<Option<DeleteHandle>>>,
}

impl MapSurface for EagerSurface {
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        let id = self.inner.add_overlay(overlay);
        let pending = self.pending.borrow_mut().take();
        if let Some(handle) = pending {
            handle.invoke();
        }
        id
    }

    fn update_overlay(&mut self, id: OverlayId, overlay: Overlay) -> bool {
        self.inner.update_overlay(id, overlay)
    }

    fn remove_overlay(&mut self, id: OverlayId) -> bool {
        self.inner.remove_overlay(id)
    }

    fn path_length(&self, path: &[LatLng]) -> f64 {
        self.inner.path_length(path)
    }

    fn polygon_area(&self, ring: &[LatLng]) -> f64 {
        self.inner.polygon_area(ring)
    }
}

#[test]
fn test_delete_while_controller_is_busy_is_deferred() {
    let observer = MemorySurface::new(seoul());
    let pending = Rc::new(RefCell::new(None));
    let mut controller = ToolModeController::with_surface(
        EagerSurface {
            inner: observer.clone(),
            pending: Rc::clone(&pending),
        },
        ToolOptions::default(),
    );
    let p = observer.projection();

    controller.set_mode(Some(ToolMode::Distance));
    controller.handle_event(PointerEvent::click(p.from_meters(0.0, 0.0)));
    controller.handle_event(PointerEvent::click(p.from_meters(10.0, 0.0)));
    controller.handle_event(PointerEvent::right_click(p.from_meters(10.0, 0.0)));
    let finished = controller.measurements()[0].clone();

    // fires while the next session is creating its first overlay
    *pending.borrow_mut() = controller.delete_handle(finished.id);
    controller.handle_event(PointerEvent::click(p.from_meters(50.0, 50.0)));

    assert_eq!(controller.measurement_count(), 0);
    assert!(finished.overlay_ids().all(|id| !observer.contains(id)));
    assert!(controller.is_drawing());
    assert_eq!(observer.overlay_count(), controller.live_overlay_count());
}

#[test]
fn test_operations_without_surface_are_noops() {
    let mut controller: ToolModeController<MemorySurface> =
        ToolModeController::new(ToolOptions::default());
    let at = seoul();

    controller.set_mode(Some(ToolMode::Distance));
    controller.handle_event(PointerEvent::click(at));
    controller.handle_event(PointerEvent::moved(at));
    controller.handle_event(PointerEvent::right_click(at));
    assert!(!controller.is_drawing());
    assert_eq!(controller.measurement_count(), 0);
    assert_eq!(controller.clear_all(), 0);

    // the surface shows up later, e.g. once geocoding resolved
    let surface = MemorySurface::new(at);
    controller.attach_surface(surface.clone());
    controller.handle_event(PointerEvent::click(at));
    assert!(controller.is_drawing());
    assert!(surface.overlay_count() > 0);
}

#[test]
fn test_drop_removes_everything() {
    let surface = MemorySurface::new(seoul());
    let p = surface.projection();
    let leftover;
    {
        let mut controller = ToolModeController::with_surface(surface.clone(), ToolOptions::default());
        controller.set_mode(Some(ToolMode::CircleRadius));
        controller.handle_event(PointerEvent::click(p.from_meters(0.0, 0.0)));
        controller.handle_event(PointerEvent::click(p.from_meters(0.0, 80.0)));
        controller.handle_event(PointerEvent::click(p.from_meters(200.0, 0.0)));
        controller.handle_event(PointerEvent::moved(p.from_meters(200.0, 30.0)));
        assert_eq!(controller.measurement_count(), 1);
        assert!(controller.is_drawing());
        leftover = controller.delete_handle(controller.measurements()[0].id);
    }
    assert_eq!(surface.overlay_count(), 0);
    assert_eq!(surface.drawing_mode(), None);
    let (added, removed) = surface.lifetime_counts();
    assert_eq!(added, removed);

    // a handle that outlived its controller is inert
    if let Some(handle) = leftover {
        handle.invoke();
    }
    assert_eq!(surface.overlay_count(), 0);
}

#[test]
fn test_detach_cleans_up_and_returns_surface() {
    let mut h = Harness::new();
    h.mode(ToolMode::Shape(VendorShape::Marker));
    h.surface.begin_vendor_drawing();
    h.surface.complete_vendor_drawing();
    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.right_click(10.0, 0.0);
    h.click(0.0, 10.0);

    let surface = h.controller.detach_surface().expect("surface attached");
    assert_eq!(surface.overlay_count(), 0);
    assert_eq!(surface.vendor_shape_count(), 0);
    assert!(!h.controller.has_surface());
    assert_eq!(h.controller.measurement_count(), 0);
    assert_eq!(h.controller.mode(), Some(ToolMode::Distance));
}

#[test]
fn test_vendor_mode_arming() {
    let mut h = Harness::new();

    h.mode(ToolMode::Shape(VendorShape::Rectangle));
    assert_eq!(h.surface.drawing_mode(), Some(VendorShape::Rectangle));
    assert!(h.surface.begin_vendor_drawing());

    // switching shapes aborts the drawing in progress
    h.mode(ToolMode::Shape(VendorShape::Polyline));
    assert_eq!(h.surface.vendor_in_progress(), None);
    assert_eq!(h.surface.drawing_mode(), Some(VendorShape::Polyline));

    h.surface.begin_vendor_drawing();
    h.surface.complete_vendor_drawing();
    h.surface.begin_vendor_drawing();
    h.controller.set_mode(None);
    assert_eq!(h.surface.drawing_mode(), None);
    assert_eq!(h.surface.vendor_in_progress(), None);
    assert_eq!(h.surface.vendor_shape_count(), 1);
}

#[test]
fn test_clear_all_keeps_mode_and_resets_vendor() {
    let mut h = Harness::new();
    h.mode(ToolMode::Shape(VendorShape::Circle));
    h.surface.begin_vendor_drawing();
    h.surface.complete_vendor_drawing();

    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.right_click(10.0, 0.0);
    h.mode(ToolMode::Area);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.click(0.0, 10.0);
    h.right_click(0.0, 10.0);
    h.click(50.0, 50.0);

    assert_eq!(h.controller.clear_all(), 2);
    assert_eq!(h.surface.overlay_count(), 0);
    assert_eq!(h.surface.vendor_shape_count(), 0);
    assert!(!h.controller.is_drawing());
    assert_eq!(h.controller.mode(), Some(ToolMode::Area));

    // tool still works afterwards
    h.click(0.0, 0.0);
    assert!(h.controller.is_drawing());
}

#[test]
fn test_event_sequence() {
    let surface = MemorySurface::new(seoul());
    let p = surface.projection();
    let mut controller: ToolModeController<MemorySurface> = ToolModeController::with_event_config(
        ToolOptions::default(),
        EventBusConfig {
            enable_history: true,
            max_history_size: 64,
        },
    );
    controller.attach_surface(surface);

    controller.set_mode(Some(ToolMode::Distance));
    controller.handle_event(PointerEvent::click(p.from_meters(0.0, 0.0)));
    controller.handle_event(PointerEvent::moved(p.from_meters(5.0, 0.0)));
    controller.handle_event(PointerEvent::click(p.from_meters(10.0, 0.0)));
    controller.handle_event(PointerEvent::right_click(p.from_meters(10.0, 0.0)));
    controller.handle_event(PointerEvent::click(p.from_meters(0.0, 0.0)));
    controller.set_mode(None);

    let history = controller.events().history();
    let id = controller.measurements()[0].id;
    assert_eq!(
        history,
        vec![
            MapEvent::Mode(ModeEvent::Changed {
                from: None,
                to: Some(ToolMode::Distance),
            }),
            MapEvent::Session(SessionEvent::Started {
                tool: ToolKind::Distance,
                at: p.from_meters(0.0, 0.0),
            }),
            MapEvent::Session(SessionEvent::VertexAdded {
                tool: ToolKind::Distance,
                vertices: 2,
            }),
            MapEvent::Measurement(MeasurementEvent::Finalized {
                id,
                tool: ToolKind::Distance,
                metric: controller.measurements()[0].metric,
            }),
            MapEvent::Session(SessionEvent::Started {
                tool: ToolKind::Distance,
                at: p.from_meters(0.0, 0.0),
            }),
            MapEvent::Session(SessionEvent::Cancelled {
                tool: ToolKind::Distance,
                reason: CancelReason::ModeChanged,
            }),
            MapEvent::Mode(ModeEvent::Changed {
                from: Some(ToolMode::Distance),
                to: None,
            }),
        ]
    );
}
