use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AlertArea, BoundingBox, Coordinate};
use crate::spatial::{
    bounding_box, centroid, haversine, make_circle_polygon, point_in_polygon, point_in_radius,
    validate_polygon,
};

/// Outcome of validating an alert area at setup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub bounding_box: BoundingBox,
}

impl AlertArea {
    /// Strict validation for the area-creation workflow. Explains why an
    /// area would never match instead of just saying so.
    pub fn check(&self) -> Result<(), EngineError> {
        match self {
            AlertArea::Polygon { ring } => {
                if ring.len() < 4 {
                    return Err(EngineError::InvalidArea(format!(
                        "polygon ring needs at least 4 coordinates, got {}",
                        ring.len()
                    )));
                }
                if !validate_polygon(ring) {
                    return Err(EngineError::InvalidArea(
                        "polygon ring is not closed: first and last coordinates differ".to_string(),
                    ));
                }
                if let Some(c) = ring.iter().find(|c| c.validated().is_err()) {
                    return Err(EngineError::InvalidArea(format!(
                        "polygon vertex ({}, {}) is out of range",
                        c.lat, c.lng
                    )));
                }
                Ok(())
            }
            AlertArea::Circle { center, radius_km } => {
                center
                    .validated()
                    .map_err(|e| EngineError::InvalidArea(format!("circle center: {}", e)))?;
                if !(*radius_km > 0.0) || !radius_km.is_finite() {
                    return Err(EngineError::InvalidArea(format!(
                        "circle radius must be positive, got {}",
                        radius_km
                    )));
                }
                Ok(())
            }
        }
    }

    /// Validation result bundled with the area's extent, for setup screens.
    pub fn report(&self, circle_steps: usize) -> AreaReport {
        let reason = self.check().err().map(|e| e.to_string());
        AreaReport {
            valid: reason.is_none(),
            reason,
            bounding_box: self.bounding_box(circle_steps),
        }
    }

    /// The area as a closed ring. Circles are approximated with
    /// `circle_steps` vertices.
    pub fn as_polygon(&self, circle_steps: usize) -> Vec<Coordinate> {
        match self {
            AlertArea::Polygon { ring } => ring.clone(),
            AlertArea::Circle { center, radius_km } => {
                make_circle_polygon(*center, *radius_km, circle_steps)
            }
        }
    }

    pub fn bounding_box(&self, circle_steps: usize) -> BoundingBox {
        bounding_box(&self.as_polygon(circle_steps))
    }

    /// The point matches are ranked against: the vertex mean for polygons,
    /// the center for circles.
    pub fn anchor(&self) -> Coordinate {
        match self {
            AlertArea::Polygon { ring } => centroid(ring),
            AlertArea::Circle { center, .. } => *center,
        }
    }

    /// Distance from `point` to the area's anchor when the area contains the
    /// point. Malformed areas never contain anything.
    pub fn match_distance(&self, point: Coordinate) -> Option<f64> {
        let contains = match self {
            AlertArea::Polygon { ring } => validate_polygon(ring) && point_in_polygon(point, ring),
            AlertArea::Circle { center, radius_km } => point_in_radius(point, *center, *radius_km),
        };
        contains.then(|| haversine(point, self.anchor()))
    }
}
