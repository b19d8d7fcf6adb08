//! Measurement formatting
//!
//! Converts raw linear and areal measurements into the text shown on map
//! annotations: distances in meters, areas in square meters and derived
//! walking/cycling times.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Average walking speed in meters per minute.
pub const WALKING_METERS_PER_MINUTE: f64 = 67.0;

/// Average cycling speed in meters per minute.
pub const CYCLING_METERS_PER_MINUTE: f64 = 227.0;

/// Travel speeds used for time estimates.
///
/// These are policy values rather than measured ones. Override them through
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelSpeeds {
    /// Walking speed (m/min)
    pub walking_m_per_min: f64,
    /// Cycling speed (m/min)
    pub cycling_m_per_min: f64,
}

impl Default for TravelSpeeds {
    fn default() -> Self {
        Self {
            walking_m_per_min: WALKING_METERS_PER_MINUTE,
            cycling_m_per_min: CYCLING_METERS_PER_MINUTE,
        }
    }
}

/// Walking and cycling time for a given distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelEstimate {
    pub walking_minutes: u64,
    pub cycling_minutes: u64,
}

impl TravelEstimate {
    /// Estimate travel times for `distance_m` meters at `speeds`.
    pub fn from_distance(distance_m: f64, speeds: &TravelSpeeds) -> Self {
        Self {
            walking_minutes: travel_minutes(distance_m, speeds.walking_m_per_min),
            cycling_minutes: travel_minutes(distance_m, speeds.cycling_m_per_min),
        }
    }

    pub fn walking(&self) -> String {
        format_minutes(self.walking_minutes)
    }

    pub fn cycling(&self) -> String {
        format_minutes(self.cycling_minutes)
    }
}

impl fmt::Display for TravelEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "도보 {} · 자전거 {}", self.walking(), self.cycling())
    }
}

/// Whole minutes needed to cover `distance_m` at `meters_per_minute`.
///
/// Degenerate input (negative, non-finite, zero speed) yields 0.
pub fn travel_minutes(distance_m: f64, meters_per_minute: f64) -> u64 {
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return 0;
    }
    if !meters_per_minute.is_finite() || meters_per_minute <= 0.0 {
        return 0;
    }
    (distance_m / meters_per_minute).floor() as u64
}

/// Render minutes as `"N분"`, or `"H시간 M분"` above one hour.
pub fn format_minutes(minutes: u64) -> String {
    if minutes > 60 {
        format!("{}시간 {}분", minutes / 60, minutes % 60)
    } else {
        format!("{}분", minutes)
    }
}

/// Travel estimate at the default speeds.
pub fn format_travel_time(distance_m: f64) -> TravelEstimate {
    TravelEstimate::from_distance(distance_m, &TravelSpeeds::default())
}

/// Format a distance as whole meters, e.g. `"1,234m"`.
pub fn format_distance(meters: f64) -> String {
    format!("{}m", group_thousands(meters))
}

/// Format an area as whole square meters, e.g. `"12,345m²"`.
pub fn format_area(square_meters: f64) -> String {
    format!("{}m²", group_thousands(square_meters))
}

fn group_thousands(value: f64) -> String {
    let rounded = if value.is_finite() {
        value.max(0.0).round() as u64
    } else {
        0
    };
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
