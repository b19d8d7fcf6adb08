//! Map surface capability interface.
//!
//! A [`MapSurface`] is whatever actually draws on the map: a web map SDK
//! binding, a native widget, or the in-memory [`MemorySurface`] used by the
//! tests and the replay tool. The measurement tools only ever talk to the
//! map through this trait, and every geometric quantity they report comes
//! from the surface's own length and area queries.

mod memory;

pub use memory::MemorySurface;

use mapmeasure_core::{LatLng, VendorShape};

use crate::overlay::{Overlay, OverlayId};

/// Capabilities the measurement tools need from a map.
pub trait MapSurface {
    /// Create an overlay and show it on the map.
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId;

    /// Replace an existing overlay's geometry, style or content.
    ///
    /// Returns false if the overlay is no longer on the map.
    fn update_overlay(&mut self, id: OverlayId, overlay: Overlay) -> bool;

    /// Take an overlay off the map.
    ///
    /// Returns false if the overlay was already gone.
    fn remove_overlay(&mut self, id: OverlayId) -> bool;

    /// Length in meters of a polyline through `path`.
    fn path_length(&self, path: &[LatLng]) -> f64;

    /// Distance in meters between two points.
    fn distance(&self, a: LatLng, b: LatLng) -> f64 {
        self.path_length(&[a, b])
    }

    /// Area in square meters enclosed by `ring` (implicitly closed).
    fn polygon_area(&self, ring: &[LatLng]) -> f64;

    /// Arm the vendor drawing manager with a shape, or disarm it.
    fn set_drawing_mode(&mut self, _shape: Option<VendorShape>) {}

    /// Abort a vendor drawing in progress.
    fn cancel_drawing(&mut self) {}

    /// Remove shapes the vendor drawing manager has drawn.
    fn clear_drawn_shapes(&mut self) {}
}
