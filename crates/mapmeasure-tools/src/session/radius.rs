//! Radius tool: a circle around a fixed center.

use mapmeasure_core::{format_distance, LatLng, ToolKind, TravelEstimate};

use super::{travel_lines, ClickOutcome, Drawing, LiveOverlays, MeasureTool};
use crate::options::ToolOptions;
use crate::overlay::{AnnotationLine, Overlay};
use crate::surface::MapSurface;

/// Circle radius with walking and cycling time
#[derive(Debug, Clone, Copy, Default)]
pub struct RadiusTool;

impl MeasureTool for RadiusTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Radius
    }

    fn begin(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions) {
        let center = drawing.first_vertex();
        let style = &options.styles.radius;
        let overlays = &mut drawing.overlays;
        overlays.markers.push(surface.add_overlay(Overlay::Dot {
            position: center,
            label: None,
            style: style.clone(),
        }));
        overlays.shape = Some(surface.add_overlay(Overlay::Circle {
            center,
            radius: 0.0,
            style: style.clone(),
        }));
        overlays.guide = Some(surface.add_overlay(Overlay::Polyline {
            path: vec![center, center],
            style: options.styles.preview.clone(),
        }));
    }

    /// A second click fixes the edge and ends the session.
    fn click(
        &self,
        drawing: &mut Drawing,
        surface: &mut dyn MapSurface,
        at: LatLng,
        options: &ToolOptions,
    ) -> ClickOutcome {
        drawing.pointer = Some(at);
        self.track(drawing, surface, options);
        ClickOutcome::Finalize
    }

    fn track(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions) {
        let Some(edge) = drawing.pointer else {
            return;
        };
        let center = drawing.first_vertex();
        let radius = surface.distance(center, edge);
        drawing.committed = radius;

        LiveOverlays::put(
            &mut drawing.overlays.shape,
            surface,
            Overlay::Circle {
                center,
                radius,
                style: options.styles.radius.clone(),
            },
        );
        LiveOverlays::put(
            &mut drawing.overlays.guide,
            surface,
            Overlay::Polyline {
                path: vec![center, edge],
                style: options.styles.preview.clone(),
            },
        );

        if options.show_live_label {
            let estimate = TravelEstimate::from_distance(radius, &options.speeds);
            LiveOverlays::put(
                &mut drawing.overlays.label,
                surface,
                Overlay::Label {
                    position: edge,
                    text: format!("반경 {} · {}", format_distance(radius), estimate),
                },
            );
        }
    }

    fn measure(&self, drawing: &Drawing, surface: &dyn MapSurface) -> f64 {
        drawing
            .pointer
            .map(|edge| surface.distance(drawing.first_vertex(), edge))
            .unwrap_or(0.0)
    }

    fn can_finalize(&self, _drawing: &Drawing, metric: f64) -> bool {
        metric > 0.0
    }

    /// The radius line stays with the circle.
    fn keeps_guide(&self) -> bool {
        true
    }

    fn anchor(&self, drawing: &Drawing) -> LatLng {
        drawing.pointer.unwrap_or_else(|| drawing.first_vertex())
    }

    fn annotate(&self, metric: f64, options: &ToolOptions) -> Vec<AnnotationLine> {
        travel_lines("반경", metric, options)
    }
}
