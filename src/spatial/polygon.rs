use std::f64::consts::PI;

use geo::{BoundingRect, Coord, LineString};

use crate::models::{BoundingBox, Coordinate};
use crate::spatial::EARTH_RADIUS_KM;

/// A ring is a valid alert polygon when it has at least four coordinates and
/// its first and last coordinates are identical.
///
/// Winding order and self-intersection are not checked; a self-intersecting
/// ring passes and is then subject to whatever even-odd ray casting makes of
/// it.
pub fn validate_polygon(ring: &[Coordinate]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() >= 4 => {
            first.lat.to_bits() == last.lat.to_bits() && first.lng.to_bits() == last.lng.to_bits()
        }
        _ => false,
    }
}

/// Arithmetic mean of the ring's vertices, not counting the closing vertex.
///
/// This is an approximation used as a ranking anchor, not the area centroid:
/// vertices bunched along one side pull it towards that side. An empty ring
/// yields (0, 0).
pub fn centroid(ring: &[Coordinate]) -> Coordinate {
    let vertices = match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    };
    if vertices.is_empty() {
        return Coordinate::new(0.0, 0.0);
    }

    let n = vertices.len() as f64;
    let (lat_sum, lng_sum) = vertices
        .iter()
        .fold((0.0, 0.0), |(lat, lng), c| (lat + c.lat, lng + c.lng));
    Coordinate::new(lat_sum / n, lng_sum / n)
}

/// Approximates a circle by `steps` points placed at equal bearings,
/// `radius_km` along the great circle from `center`, closed by repeating the
/// first point. Fewer than three steps are raised to three so the result is
/// always a valid polygon.
///
/// Longitudes are wrapped into [-180, 180). A circle that crosses the
/// antimeridian therefore yields a ring whose vertices jump between the two
/// hemispheres; planar ray casting over such a ring does not contain the
/// circle's center, and its bounding box spans almost every longitude. Alert
/// areas near the antimeridian should stay circles, which are matched by
/// great-circle distance and have no such seam.
pub fn make_circle_polygon(center: Coordinate, radius_km: f64, steps: usize) -> Vec<Coordinate> {
    let steps = steps.max(3);
    let lat1 = center.lat.to_radians();
    let lng1 = center.lng.to_radians();
    let angular = radius_km / EARTH_RADIUS_KM;

    let mut ring: Vec<Coordinate> = (0..steps)
        .map(|i| {
            let bearing = 2.0 * PI * i as f64 / steps as f64;
            let lat2 = (lat1.sin() * angular.cos()
                + lat1.cos() * angular.sin() * bearing.cos())
            .asin();
            let lng2 = lng1
                + (bearing.sin() * angular.sin() * lat1.cos())
                    .atan2(angular.cos() - lat1.sin() * lat2.sin());
            Coordinate::new(lat2.to_degrees(), normalize_lng(lng2.to_degrees()))
        })
        .collect();

    ring.push(ring[0]);
    ring
}

/// Wraps a longitude into [-180, 180).
fn normalize_lng(lng: f64) -> f64 {
    (lng + 540.0).rem_euclid(360.0) - 180.0
}

/// Smallest latitude/longitude box containing every point. An empty slice
/// yields the all-zero box.
pub fn bounding_box(points: &[Coordinate]) -> BoundingBox {
    let line: LineString<f64> = points.iter().map(|&c| Coord::from(c)).collect();
    match line.bounding_rect() {
        Some(rect) => BoundingBox {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        },
        None => BoundingBox::default(),
    }
}
