use mapmeasure_core::{ToolMode, VendorShape};
use mapmeasure_tools::OverlayKind;
use proptest::prelude::*;

use crate::common::Harness;

#[derive(Debug, Clone)]
enum Step {
    Click(f64, f64),
    Move(f64, f64),
    RightClick(f64, f64),
    Mode(Option<ToolMode>),
    ClearAll,
    DeleteOldest,
}

fn modes() -> Vec<Option<ToolMode>> {
    vec![
        None,
        Some(ToolMode::Distance),
        Some(ToolMode::CircleRadius),
        Some(ToolMode::Area),
        Some(ToolMode::Shape(VendorShape::Polygon)),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    let coord = (-500.0..500.0f64, -500.0..500.0f64);
    prop_oneof![
        5 => coord.clone().prop_map(|(x, y)| Step::Click(x, y)),
        4 => coord.clone().prop_map(|(x, y)| Step::Move(x, y)),
        2 => coord.prop_map(|(x, y)| Step::RightClick(x, y)),
        2 => prop::sample::select(modes()).prop_map(Step::Mode),
        1 => Just(Step::ClearAll),
        1 => Just(Step::DeleteOldest),
    ]
}

fn run(h: &mut Harness, step: &Step) {
    match *step {
        Step::Click(x, y) => h.click(x, y),
        Step::Move(x, y) => h.move_to(x, y),
        Step::RightClick(x, y) => h.right_click(x, y),
        Step::Mode(mode) => h.controller.set_mode(mode),
        Step::ClearAll => {
            h.controller.clear_all();
        }
        Step::DeleteOldest => {
            if let Some(first) = h.controller.measurements().first() {
                first.delete.invoke();
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_every_overlay_is_owned_and_cleanup_is_total(
        steps in prop::collection::vec(step(), 0..60),
    ) {
        let mut h = Harness::new();
        for step in &steps {
            run(&mut h, step);
            prop_assert!(h.overlays_accounted_for(), "after {:?}", step);
        }

        h.controller.set_mode(None);
        prop_assert_eq!(h.controller.live_overlay_count(), 0);
        prop_assert_eq!(h.surface.overlay_count(), h.finalized_overlay_count());

        h.controller.clear_all();
        prop_assert_eq!(h.surface.overlay_count(), 0);
        let (added, removed) = h.surface.lifetime_counts();
        prop_assert_eq!(added, removed);
    }
}

#[test]
fn test_cancel_paths_remove_live_overlays() {
    // rightclick with too few vertices
    let mut h = Harness::new();
    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.move_to(10.0, 10.0);
    h.right_click(10.0, 10.0);
    assert_eq!(h.surface.overlay_count(), 0);

    // mode change with many vertices
    h.mode(ToolMode::Area);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
        h.click(x, y);
    }
    h.move_to(-5.0, 5.0);
    h.mode(ToolMode::CircleRadius);
    assert_eq!(h.surface.overlay_count(), 0);

    // clear_all mid-session
    h.click(0.0, 0.0);
    h.move_to(30.0, 0.0);
    h.controller.clear_all();
    assert_eq!(h.surface.overlay_count(), 0);
    assert!(!h.controller.is_drawing());
}

#[test]
fn test_finalize_drops_every_transient_overlay() {
    let square = vec![(0.0, 0.0), (40.0, 0.0), (40.0, 40.0)];
    for (mode, clicks) in [
        (ToolMode::Distance, square.clone()),
        (ToolMode::CircleRadius, vec![(0.0, 0.0)]),
        (ToolMode::Area, square),
    ] {
        let mut h = Harness::new();
        h.mode(mode);
        for (x, y) in clicks {
            h.click(x, y);
            h.move_to(x + 5.0, y + 5.0);
        }
        h.right_click(0.0, 40.0);

        assert_eq!(h.controller.measurement_count(), 1, "{}", mode);
        assert_eq!(h.controller.live_overlay_count(), 0, "{}", mode);
        assert_eq!(h.surface.count_of(OverlayKind::Label), 0, "{}", mode);
        assert_eq!(h.surface.count_of(OverlayKind::Bubble), 1, "{}", mode);
        assert_eq!(h.surface.overlay_count(), h.finalized_overlay_count(), "{}", mode);
    }
}

#[test]
fn test_only_one_tool_active_at_a_time() {
    let mut h = Harness::new();

    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);

    h.mode(ToolMode::Shape(VendorShape::Circle));
    assert!(!h.controller.is_drawing());
    assert_eq!(h.surface.drawing_mode(), Some(VendorShape::Circle));

    // pointer events are left to the vendor manager
    h.click(0.0, 0.0);
    assert!(!h.controller.is_drawing());
    assert_eq!(h.surface.overlay_count(), 0);

    h.mode(ToolMode::Area);
    assert_eq!(h.surface.drawing_mode(), None);
    h.click(0.0, 0.0);
    assert!(h.controller.is_drawing());

    h.mode(ToolMode::CircleRadius);
    h.click(0.0, 0.0);
    // only the radius session is live
    assert_eq!(h.controller.live_overlay_count(), 3);
    assert_eq!(h.surface.overlay_count(), 3);
    assert_eq!(h.surface.drawing_mode(), None);
}

#[test]
fn test_deletion_is_idempotent() {
    let mut h = Harness::new();
    h.mode(ToolMode::Distance);
    h.click(0.0, 0.0);
    h.click(10.0, 0.0);
    h.right_click(10.0, 0.0);
    h.click(0.0, 20.0);
    h.click(10.0, 20.0);
    h.right_click(10.0, 20.0);

    let measurements = h.controller.measurements();
    let first = &measurements[0];
    let second = &measurements[1];
    let (bubble, _) = h.surface.bubble_for(first.id).expect("bubble on map");

    assert!(h.surface.press_delete(bubble));
    assert!(!h.surface.press_delete(bubble));
    first.delete.invoke();
    assert!(!h.controller.delete_measurement(first.id));

    assert_eq!(h.controller.measurement_count(), 1);
    assert!(second.overlay_ids().all(|id| h.surface.contains(id)));
    assert!(first.overlay_ids().all(|id| !h.surface.contains(id)));

    assert!(h.controller.delete_measurement(second.id));
    assert_eq!(h.surface.overlay_count(), 0);
}
