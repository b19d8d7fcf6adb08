//! Area tool: a polygon closed on finalize.

use mapmeasure_core::{format_area, LatLng, ToolKind};

use super::{ClickOutcome, Drawing, LiveOverlays, MeasureTool};
use crate::options::ToolOptions;
use crate::overlay::{AnnotationLine, Overlay};
use crate::surface::MapSurface;

/// Polygon area
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaTool;

impl AreaTool {
    /// Committed vertices followed by the trailing vertex.
    fn live_ring(drawing: &Drawing, trailing: LatLng) -> Vec<LatLng> {
        let mut ring = drawing.vertices.clone();
        ring.push(trailing);
        ring
    }
}

impl MeasureTool for AreaTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Area
    }

    fn begin(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions) {
        let start = drawing.first_vertex();
        drawing.overlays.shape = Some(surface.add_overlay(Overlay::Polygon {
            path: vec![start],
            style: options.styles.area.clone(),
        }));
        drawing.overlays.guide = Some(surface.add_overlay(Overlay::Polygon {
            path: vec![start, start],
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
        drawing.vertices.push(at);
        drawing.committed = surface.polygon_area(&drawing.vertices);

        LiveOverlays::put(
            &mut drawing.overlays.shape,
            surface,
            Overlay::Polygon {
                path: drawing.vertices.clone(),
                style: options.styles.area.clone(),
            },
        );
        let ring = Self::live_ring(drawing, at);
        LiveOverlays::put(
            &mut drawing.overlays.guide,
            surface,
            Overlay::Polygon {
                path: ring,
                style: options.styles.preview.clone(),
            },
        );
        ClickOutcome::Continue
    }

    fn track(&self, drawing: &mut Drawing, surface: &mut dyn MapSurface, options: &ToolOptions) {
        let Some(pointer) = drawing.pointer else {
            return;
        };
        let ring = Self::live_ring(drawing, pointer);
        let candidate = surface.polygon_area(&ring);

        LiveOverlays::put(
            &mut drawing.overlays.guide,
            surface,
            Overlay::Polygon {
                path: ring,
                style: options.styles.preview.clone(),
            },
        );

        if options.show_live_label {
            LiveOverlays::put(
                &mut drawing.overlays.label,
                surface,
                Overlay::Label {
                    position: pointer,
                    text: format!("면적 {}", format_area(candidate)),
                },
            );
        }
    }

    fn measure(&self, drawing: &Drawing, surface: &dyn MapSurface) -> f64 {
        surface.polygon_area(&drawing.vertices)
    }

    fn can_finalize(&self, drawing: &Drawing, _metric: f64) -> bool {
        drawing.vertices.len() > 2
    }

    fn annotate(&self, metric: f64, _options: &ToolOptions) -> Vec<AnnotationLine> {
        vec![AnnotationLine::new("총 면적", format_area(metric))]
    }
}
