//! In-memory map surface.
//!
//! Keeps overlays in a map keyed by [`OverlayId`] and measures with a local
//! equirectangular projection around the map center. The surface is a cheap
//! `Clone` handle over shared state, so a test can keep one copy while the
//! controller owns another.

use std::collections::BTreeMap;

use mapmeasure_core::{shared, LatLng, LocalProjection, MeasurementId, Shared, VendorShape};

use super::MapSurface;
use crate::overlay::{AnnotationBubble, DeleteHandle, Overlay, OverlayId, OverlayKind};

#[derive(Debug)]
struct MemoryMap {
    projection: LocalProjection,
    next_id: u64,
    overlays: BTreeMap<OverlayId, Overlay>,
    added: usize,
    removed: usize,
    drawing_mode: Option<VendorShape>,
    vendor_in_progress: Option<VendorShape>,
    vendor_shapes: Vec<VendorShape>,
}

/// Map surface that keeps everything in memory
#[derive(Debug, Clone)]
pub struct MemorySurface {
    map: Shared<MemoryMap>,
}

impl MemorySurface {
    /// Create an empty map centered on `center`.
    pub fn new(center: LatLng) -> Self {
        Self {
            map: shared(MemoryMap {
                projection: LocalProjection::new(center),
                next_id: 1,
                overlays: BTreeMap::new(),
                added: 0,
                removed: 0,
                drawing_mode: None,
                vendor_in_progress: None,
                vendor_shapes: Vec::new(),
            }),
        }
    }

    pub fn center(&self) -> LatLng {
        self.map.borrow().projection.origin()
    }

    pub fn projection(&self) -> LocalProjection {
        self.map.borrow().projection
    }

    /// Number of overlays currently on the map
    pub fn overlay_count(&self) -> usize {
        self.map.borrow().overlays.len()
    }

    /// Number of overlays of one kind currently on the map
    pub fn count_of(&self, kind: OverlayKind) -> usize {
        self.map
            .borrow()
            .overlays
            .values()
            .filter(|overlay| overlay.kind() == kind)
            .count()
    }

    /// Overlays ever added and removed, for leak checks
    pub fn lifetime_counts(&self) -> (usize, usize) {
        let map = self.map.borrow();
        (map.added, map.removed)
    }

    /// Snapshot of the overlays on the map, in creation order
    pub fn overlays(&self) -> Vec<(OverlayId, Overlay)> {
        self.map
            .borrow()
            .overlays
            .iter()
            .map(|(id, overlay)| (*id, overlay.clone()))
            .collect()
    }

    pub fn overlay(&self, id: OverlayId) -> Option<Overlay> {
        self.map.borrow().overlays.get(&id).cloned()
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.map.borrow().overlays.contains_key(&id)
    }

    /// Annotation bubbles on the map, in creation order
    pub fn bubbles(&self) -> Vec<(OverlayId, AnnotationBubble)> {
        self.map
            .borrow()
            .overlays
            .iter()
            .filter_map(|(id, overlay)| overlay.as_bubble().map(|b| (*id, b.clone())))
            .collect()
    }

    /// The bubble annotating measurement `id`, if it is still shown
    pub fn bubble_for(&self, id: MeasurementId) -> Option<(OverlayId, AnnotationBubble)> {
        self.bubbles()
            .into_iter()
            .find(|(_, bubble)| bubble.measurement_id() == id)
    }

    /// Press the delete button of the bubble `overlay`.
    ///
    /// The surface lets go of its own state before running the callback, so
    /// the callback is free to remove overlays from this surface. Returns
    /// false if `overlay` is not a bubble on the map.
    pub fn press_delete(&self, overlay: OverlayId) -> bool {
        let handle: Option<DeleteHandle> = self
            .map
            .borrow()
            .overlays
            .get(&overlay)
            .and_then(Overlay::as_bubble)
            .map(|bubble| bubble.delete_handle().clone());

        match handle {
            Some(handle) => {
                handle.invoke();
                true
            }
            None => false,
        }
    }

    /// Shape the vendor drawing manager is armed with
    pub fn drawing_mode(&self) -> Option<VendorShape> {
        self.map.borrow().drawing_mode
    }

    /// Vendor shape currently being drawn by the user
    pub fn vendor_in_progress(&self) -> Option<VendorShape> {
        self.map.borrow().vendor_in_progress
    }

    /// Shapes the vendor drawing manager has completed
    pub fn vendor_shape_count(&self) -> usize {
        self.map.borrow().vendor_shapes.len()
    }

    /// Simulate the user starting a vendor drawing.
    ///
    /// Only possible while the drawing manager is armed.
    pub fn begin_vendor_drawing(&self) -> bool {
        let mut map = self.map.borrow_mut();
        match map.drawing_mode {
            Some(shape) => {
                map.vendor_in_progress = Some(shape);
                true
            }
            None => false,
        }
    }

    /// Simulate the user completing the vendor drawing in progress.
    pub fn complete_vendor_drawing(&self) -> bool {
        let mut map = self.map.borrow_mut();
        match map.vendor_in_progress.take() {
            Some(shape) => {
                map.vendor_shapes.push(shape);
                true
            }
            None => false,
        }
    }
}

impl MapSurface for MemorySurface {
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        let mut map = self.map.borrow_mut();
        let id = OverlayId::new(map.next_id);
        map.next_id += 1;
        map.added += 1;
        map.overlays.insert(id, overlay);
        id
    }

    fn update_overlay(&mut self, id: OverlayId, overlay: Overlay) -> bool {
        match self.map.borrow_mut().overlays.get_mut(&id) {
            Some(slot) => {
                *slot = overlay;
                true
            }
            None => false,
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) -> bool {
        let mut map = self.map.borrow_mut();
        let removed = map.overlays.remove(&id).is_some();
        if removed {
            map.removed += 1;
        }
        removed
    }

    fn path_length(&self, path: &[LatLng]) -> f64 {
        self.map.borrow().projection.path_length(path)
    }

    fn polygon_area(&self, ring: &[LatLng]) -> f64 {
        self.map.borrow().projection.ring_area(ring)
    }

    fn set_drawing_mode(&mut self, shape: Option<VendorShape>) {
        self.map.borrow_mut().drawing_mode = shape;
    }

    fn cancel_drawing(&mut self) {
        self.map.borrow_mut().vendor_in_progress = None;
    }

    fn clear_drawn_shapes(&mut self) {
        self.map.borrow_mut().vendor_shapes.clear();
    }
}
