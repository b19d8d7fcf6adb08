//! Distance tool: a polyline measured segment by segment.

use mapmeasure_core::{format_distance, LatLng, ToolKind};

use super::{travel_lines, ClickOutcome, Drawing, LiveOverlays, MeasureTool};
use crate::options::ToolOptions;
use crate::overlay::{AnnotationLine, Overlay};
use crate::surface::MapSurface;

/// Polyline length with walking and cycling time
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceTool;

impl DistanceTool {
    fn anchor_dot(at: LatLng, label: Option<String>, options: &ToolOptions) -> Overlay {
        Overlay::Dot {
            position: at,
            label,
            style: options.styles.distance.clone(),
        }
    }
}

impl MeasureTool for DistanceTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Distance
    }

    fn begin(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions) {
        let start = drawing.first_vertex();
        let overlays = &mut drawing.overlays;
        overlays
            .markers
            .push(surface.add_overlay(Self::anchor_dot(start, None, options)));
        overlays.shape = Some(surface.add_overlay(Overlay::Polyline {
            path: vec![start],
            style: options.styles.distance.clone(),
        }));
        overlays.guide = Some(surface.add_overlay(Overlay::Polyline {
            path: vec![start],
            style: options.styles.preview.clone(),
        }));
    }

    fn click(
        &self,
        drawing: &mut Drawing,
        surface: &mut dyn MapSurface,
        at: LatLng,
        options: &ToolOptions,
    ) -> ClickOutcome {
        let previous = drawing.last_vertex();
        drawing.vertices.push(at);
        drawing.committed = surface.path_length(&drawing.vertices);

        LiveOverlays::put(
            &mut drawing.overlays.shape,
            surface,
            Overlay::Polyline {
                path: drawing.vertices.clone(),
                style: options.styles.distance.clone(),
            },
        );

        let step = surface.distance(previous, at);
        let caption = (options.show_segment_lengths && step > 0.0).then(|| format_distance(step));
        drawing
            .overlays
            .markers
            .push(surface.add_overlay(Self::anchor_dot(at, caption, options)));

        LiveOverlays::put(
            &mut drawing.overlays.guide,
            surface,
            Overlay::Polyline {
                path: vec![at],
                style: options.styles.preview.clone(),
            },
        );
        ClickOutcome::Continue
    }

    fn track(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions) {
        let Some(pointer) = drawing.pointer else {
            return;
        };
        let last = drawing.last_vertex();
        LiveOverlays::put(
            &mut drawing.overlays.guide,
            surface,
            Overlay::Polyline {
                path: vec![last, pointer],
                style: options.styles.preview.clone(),
            },
        );

        if options.show_live_label {
            let candidate = drawing.committed + surface.distance(last, pointer);
            LiveOverlays::put(
                &mut drawing.overlays.label,
                surface,
                Overlay::Label {
                    position: pointer,
                    text: format!("총 거리 {}", format_distance(candidate)),
                },
            );
        }
    }

    fn measure(&self, drawing: &Drawing, surface: &dyn MapSurface) -> f64 {
        surface.path_length(&drawing.vertices)
    }

    fn can_finalize(&self, drawing: &Drawing, _metric: f64) -> bool {
        drawing.vertices.len() >= 2
    }

    fn annotate(&self, metric: f64, options: &ToolOptions) -> Vec<AnnotationLine> {
        travel_lines("총 거리", metric, options)
    }
}
