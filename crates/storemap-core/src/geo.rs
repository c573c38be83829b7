//! Geographic primitives.

use serde::{Deserialize, Serialize};

/// A point on the globe in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, -90 to 90.
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180.
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Angular extent of a viewport along each axis. Deltas are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// A rectangular map viewport: a center point plus its angular span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: GeoPoint,
    pub span: Span,
}

impl Region {
    /// Whether `point` falls inside the viewport rectangle, edges inclusive.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.span.latitude_delta / 2.0
            && (point.longitude - self.center.longitude).abs() <= self.span.longitude_delta / 2.0
    }
}
