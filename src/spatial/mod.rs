// Geometry primitives used by the alert matcher and duplicate detector
pub mod geohash;
mod distance;
mod containment;
mod polygon;

// Public exports from the spatial module
pub use distance::haversine;
pub use containment::{point_in_polygon, point_in_radius};
pub use polygon::{bounding_box, centroid, make_circle_polygon, validate_polygon};

// Constants
/// Earth radius in kilometers (standard value)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default number of vertices when a circle is rendered as a polygon
pub const DEFAULT_CIRCLE_STEPS: usize = 64;
