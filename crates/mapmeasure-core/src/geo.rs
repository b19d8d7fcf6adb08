//! Geographic coordinates and the local planar projection.
//!
//! Measurements use planar math around a reference point, the same way the
//! map engine's spherical-geometry helpers do over short distances.
//! Ellipsoidal geodesy is out of scope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean earth radius used by web map engines, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Equirectangular projection anchored at `origin`, producing meters.
///
/// `x` grows east and `y` grows north. Accurate to well under a percent
/// within a few kilometers of the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: LatLng,
    cos_lat: f64,
}

impl LocalProjection {
    pub fn new(origin: LatLng) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos(),
        }
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    /// Projects a coordinate to `(x, y)` meters relative to the origin.
    pub fn to_meters(&self, p: LatLng) -> (f64, f64) {
        let x = EARTH_RADIUS_M * (p.lng - self.origin.lng).to_radians() * self.cos_lat;
        let y = EARTH_RADIUS_M * (p.lat - self.origin.lat).to_radians();
        (x, y)
    }

    /// Inverse of [`to_meters`](Self::to_meters).
    pub fn from_meters(&self, x: f64, y: f64) -> LatLng {
        let lat = self.origin.lat + (y / EARTH_RADIUS_M).to_degrees();
        let lng = if self.cos_lat.abs() < 1e-12 {
            self.origin.lng
        } else {
            self.origin.lng + (x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees()
        };
        LatLng::new(lat, lng)
    }

    /// Planar distance between two coordinates in meters.
    pub fn distance(&self, a: LatLng, b: LatLng) -> f64 {
        let (ax, ay) = self.to_meters(a);
        let (bx, by) = self.to_meters(b);
        (bx - ax).hypot(by - ay)
    }

    /// Sum of segment lengths along `path`.
    pub fn path_length(&self, path: &[LatLng]) -> f64 {
        path.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }

    /// Unsigned shoelace area of the closed ring `ring`, in square meters.
    pub fn ring_area(&self, ring: &[LatLng]) -> f64 {
        if ring.len() < 3 {
            return 0.0;
        }
        let pts: Vec<(f64, f64)> = ring.iter().map(|p| self.to_meters(*p)).collect();
        let twice: f64 = pts
            .iter()
            .zip(pts.iter().cycle().skip(1))
            .map(|((x1, y1), (x2, y2))| x1 * y2 - x2 * y1)
            .sum();
        (twice / 2.0).abs()
    }
}
