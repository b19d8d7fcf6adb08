use mapmeasure_core::{LatLng, LocalProjection, PointerEvent, ToolMode};
use mapmeasure_tools::{MemorySurface, ToolModeController, ToolOptions};

pub fn seoul() -> LatLng {
    LatLng::new(37.5665, 126.978)
}

/// Controller on an in-memory map, driven in local meters
pub struct Harness {
    pub controller: ToolModeController<MemorySurface>,
    pub surface: MemorySurface,
    projection: LocalProjection,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(ToolOptions::default())
    }

    pub fn with_options(options: ToolOptions) -> Self {
        let surface = MemorySurface::new(seoul());
        let projection = surface.projection();
        Self {
            controller: ToolModeController::with_surface(surface.clone(), options),
            surface,
            projection,
        }
    }

    pub fn at(&self, x: f64, y: f64) -> LatLng {
        self.projection.from_meters(x, y)
    }

    pub fn projection(&self) -> LocalProjection {
        self.projection
    }

    pub fn mode(&mut self, mode: ToolMode) {
        self.controller.set_mode(Some(mode));
    }

    pub fn click(&mut self, x: f64, y: f64) {
        let at = self.at(x, y);
        self.controller.handle_event(PointerEvent::click(at));
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let at = self.at(x, y);
        self.controller.handle_event(PointerEvent::moved(at));
    }

    pub fn right_click(&mut self, x: f64, y: f64) {
        let at = self.at(x, y);
        self.controller.handle_event(PointerEvent::right_click(at));
    }

    /// Overlays on the map that belong to finalized measurements
    pub fn finalized_overlay_count(&self) -> usize {
        self.controller
            .measurements()
            .iter()
            .map(|m| m.overlay_ids().count())
            .sum()
    }

    /// Every overlay on the map is owned by a session or a measurement
    pub fn overlays_accounted_for(&self) -> bool {
        self.surface.overlay_count()
            == self.controller.live_overlay_count() + self.finalized_overlay_count()
    }
}
