use mapmeasure_core::{LatLng, MeasurementShape, PointerEvent, ToolKind, ToolMode};
use mapmeasure_tools::{MemorySurface, Overlay, OverlayKind, ToolModeController, ToolOptions};

use crate::common::Harness;

#[test]
fn test_distance_hundred_meters() {
    let mut h = Harness::new();
    h.mode(ToolMode::Distance);

    h.click(0.0, 0.0);
    h.move_to(40.0, 0.0);
    h.move_to(80.0, 0.0);
    h.click(100.0, 0.0);
    h.move_to(120.0, 10.0);
    h.right_click(120.0, 10.0);

    let measurements = h.controller.measurements();
    assert_eq!(measurements.len(), 1);
    let m = &measurements[0];
    assert_eq!(m.tool, ToolKind::Distance);
    assert_eq!(m.shape, MeasurementShape::Polyline);
    assert!((m.metric - 100.0).abs() < 1e-6);
    assert_eq!(m.vertices.len(), 2);

    let (_, bubble) = h.surface.bubble_for(m.id).expect("bubble on map");
    assert_eq!(bubble.value("총 거리"), Some("100m"));
    assert_eq!(bubble.value("도보"), Some("1분"));
    assert_eq!(bubble.value("자전거"), Some("0분"));

    // polyline, two anchor dots, bubble
    assert_eq!(h.surface.overlay_count(), 4);
    assert_eq!(h.surface.count_of(OverlayKind::Dot), 2);
    assert_eq!(h.surface.count_of(OverlayKind::Label), 0);
    assert!(!h.controller.is_drawing());
}

#[test]
fn test_distance_long_route_reports_hours() {
    let mut h = Harness::new();
    h.mode(ToolMode::Distance);

    h.click(0.0, 0.0);
    h.click(3000.0, 0.0);
    h.click(3000.0, 3750.0);
    h.right_click(3000.0, 3750.0);

    let m = &h.controller.measurements()[0];
    assert!((m.metric - 6750.0).abs() < 1e-6);
    let (_, bubble) = h.surface.bubble_for(m.id).expect("bubble on map");
    assert_eq!(bubble.value("총 거리"), Some("6,750m"));
    assert_eq!(bubble.value("도보"), Some("1시간 40분"));
    assert_eq!(bubble.value("자전거"), Some("29분"));
}

#[test]
fn test_distance_from_raw_coordinates() {
    let origin = LatLng::new(0.0, 0.0);
    let surface = MemorySurface::new(origin);
    let mut controller = ToolModeController::with_surface(surface.clone(), ToolOptions::default());
    controller.set_mode(Some(ToolMode::Distance));

    let east = LatLng::new(0.0, 0.0009);
    controller.handle_event(PointerEvent::click(origin));
    controller.handle_event(PointerEvent::click(east));
    controller.handle_event(PointerEvent::right_click(east));

    let measurements = controller.measurements();
    assert_eq!(measurements.len(), 1);
    let m = &measurements[0];
    assert_eq!(m.vertices, vec![origin, east]);
    assert!((m.metric - 100.19).abs() < 0.01, "{}", m.metric);

    let (_, bubble) = surface.bubble_for(m.id).expect("bubble on map");
    assert_eq!(bubble.value("총 거리"), Some("100m"));
    assert_eq!(bubble.value("도보"), Some("1분"));
}

#[test]
fn test_radius_five_hundred_meters() {
    let mut h = Harness::new();
    h.mode(ToolMode::CircleRadius);

    h.click(0.0, 0.0);
    h.move_to(100.0, 0.0);
    h.move_to(300.0, 400.0);
    h.right_click(300.0, 400.0);

    let measurements = h.controller.measurements();
    assert_eq!(measurements.len(), 1);
    let m = &measurements[0];
    assert_eq!(m.shape, MeasurementShape::Circle);
    assert!((m.metric - 500.0).abs() < 1e-6);

    let circle = h
        .surface
        .overlays()
        .into_iter()
        .find_map(|(_, overlay)| match overlay {
            Overlay::Circle { radius, .. } => Some(radius),
            _ => None,
        })
        .expect("circle on map");
    assert!((circle - 500.0).abs() < 1e-6);

    let (_, bubble) = h.surface.bubble_for(m.id).expect("bubble on map");
    assert_eq!(bubble.value("반경"), Some("500m"));
    assert_eq!(bubble.value("도보"), Some("7분"));
    assert_eq!(bubble.value("자전거"), Some("2분"));

    // circle, radius line, center dot, bubble
    assert_eq!(h.surface.overlay_count(), 4);
    assert_eq!(h.surface.count_of(OverlayKind::Label), 0);
}

#[test]
fn test_triangle_area_matches_shoelace() {
    let mut h = Harness::new();
    h.mode(ToolMode::Area);

    h.click(0.0, 0.0);
    h.move_to(150.0, 0.0);
    h.click(300.0, 0.0);
    h.move_to(100.0, 200.0);
    h.click(0.0, 400.0);
    h.move_to(-50.0, 200.0);
    h.right_click(-50.0, 200.0);

    let measurements = h.controller.measurements();
    assert_eq!(measurements.len(), 1);
    let m = &measurements[0];
    assert_eq!(m.shape, MeasurementShape::Polygon);

    let oracle = h
        .projection()
        .ring_area(&[h.at(0.0, 0.0), h.at(300.0, 0.0), h.at(0.0, 400.0)]);
    assert!((m.metric - oracle).abs() < 1e-6);
    assert!((m.metric - 60_000.0).abs() < 1e-3);

    let (_, bubble) = h.surface.bubble_for(m.id).expect("bubble on map");
    assert_eq!(bubble.value("총 면적"), Some("60,000m²"));

    // committed polygon and bubble only
    assert_eq!(h.surface.overlay_count(), 2);
    let polygon = h
        .surface
        .overlays()
        .into_iter()
        .find_map(|(_, overlay)| match overlay {
            Overlay::Polygon { path, .. } => Some(path.len()),
            _ => None,
        });
    assert_eq!(polygon, Some(3));
}

#[test]
fn test_clearing_mode_mid_session_leaves_nothing() {
    let mut h = Harness::new();
    h.mode(ToolMode::Distance);

    h.click(0.0, 0.0);
    h.click(50.0, 0.0);
    h.click(50.0, 50.0);
    h.move_to(80.0, 80.0);
    assert!(h.controller.is_drawing());
    assert!(h.surface.overlay_count() > 0);

    h.controller.set_mode(None);

    assert_eq!(h.surface.overlay_count(), 0);
    assert_eq!(h.controller.measurement_count(), 0);
    assert!(!h.controller.is_drawing());
    assert_eq!(h.controller.mode(), None);
}

#[test]
fn test_measurements_survive_mode_switches() {
    let mut h = Harness::new();

    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.right_click(10.0, 0.0);

    h.mode(ToolMode::CircleRadius);
    h.click(0.0, 0.0);
    h.click(0.0, 20.0);

    h.mode(ToolMode::Area);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.click(10.0, 10.0);
    h.right_click(10.0, 10.0);

    h.mode(ToolMode::Distance);

    let tools: Vec<ToolKind> = h.controller.measurements().iter().map(|m| m.tool).collect();
    assert_eq!(tools, vec![ToolKind::Distance, ToolKind::Radius, ToolKind::Area]);
    assert!(h.overlays_accounted_for());
}
