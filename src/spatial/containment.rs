use geo::{Coord, LineString};

use crate::models::Coordinate;
use crate::spatial::haversine;

/// Even-odd ray casting test of `point` against `ring`.
///
/// A horizontal ray is cast from the point towards increasing longitude and
/// the ring edges it crosses are counted; an odd count means inside. Points
/// lying exactly on an edge or vertex get whatever the crossing arithmetic
/// yields. An open ring is treated as if closed. Rings with fewer than three
/// positions once closed never contain anything; repeated positions are not
/// collapsed, but a ring that only retraces a line encloses no area and
/// contains nothing either.
pub fn point_in_polygon(point: Coordinate, ring: &[Coordinate]) -> bool {
    let mut line: LineString<f64> = ring.iter().map(|&c| Coord::from(c)).collect();
    line.close();

    // A closed LineString repeats its first coordinate at the end
    if line.0.len() < 4 {
        return false;
    }

    let p = Coord::from(point);
    let mut inside = false;
    for edge in line.lines() {
        let (a, b) = (edge.start, edge.end);
        if (a.y > p.y) != (b.y > p.y) {
            let crossing_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < crossing_x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Boundary-inclusive circle test. A non-positive or non-finite radius never
/// contains anything.
pub fn point_in_radius(point: Coordinate, center: Coordinate, radius_km: f64) -> bool {
    if !(radius_km > 0.0) || !radius_km.is_finite() {
        return false;
    }
    haversine(point, center) <= radius_km
}
