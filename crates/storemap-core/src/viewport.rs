//! Map viewport fitting.
//!
//! Computes the region that displays a set of annotation points with a
//! proportional margin. The longitude axis of the default span widens with
//! latitude curvature so the physical extent stays ~equal across the globe.

use crate::geo::{GeoPoint, Region, Span};

const METERS_PER_LAT_DEGREE: f64 = 111_120.0;

/// Tuning constants for [`fit_with`].
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Physical span used when there are fewer than two points, in meters.
    pub default_span_meters: f64,
    /// Proportional padding applied around a multi-point bounding box.
    pub margin: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            default_span_meters: 1_000.0,
            margin: 1.1,
        }
    }
}

/// Fit a viewport around `points` with the default span and margin.
///
/// See [`fit_with`].
#[must_use]
pub fn fit(points: &[GeoPoint], fallback: GeoPoint) -> Region {
    fit_with(points, fallback, &FitConfig::default())
}

/// Fit a viewport around `points`.
///
/// With no points the region centers on `fallback`; with one point it centers
/// on that point; with two or more it covers the axis-aligned bounding box of
/// all points, padded by `config.margin` on each axis. Identical points
/// produce a zero span. Clamping to a minimum viewable span, and to
/// displayable world bounds, is the caller's concern.
#[must_use]
pub fn fit_with(points: &[GeoPoint], fallback: GeoPoint, config: &FitConfig) -> Region {
    match points {
        [] => default_region(fallback, config),
        [point] => default_region(*point, config),
        _ => bounding_region(points, config),
    }
}

/// A region of `default_span_meters` per axis around a single point.
fn default_region(center: GeoPoint, config: &FitConfig) -> Region {
    let latitude_delta = config.default_span_meters / METERS_PER_LAT_DEGREE;
    let longitude_delta = config.default_span_meters
        / (METERS_PER_LAT_DEGREE * center.latitude.to_radians().cos());
    Region {
        center,
        span: Span {
            latitude_delta,
            longitude_delta,
        },
    }
}

/// The padded bounding box of two or more points.
fn bounding_region(points: &[GeoPoint], config: &FitConfig) -> Region {
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;

    for point in points {
        min_lat = min_lat.min(point.latitude);
        max_lat = max_lat.max(point.latitude);
        min_lon = min_lon.min(point.longitude);
        max_lon = max_lon.max(point.longitude);
    }

    Region {
        center: GeoPoint {
            latitude: (min_lat + max_lat) / 2.0,
            longitude: (min_lon + max_lon) / 2.0,
        },
        span: Span {
            latitude_delta: (max_lat - min_lat) * config.margin,
            longitude_delta: (max_lon - min_lon) * config.margin,
        },
    }
}
