//! Sighting screening service.
//!
//! Composes the engine components into the flow a report-submission handler
//! needs: check for a duplicate first, and only when there is none rank the
//! owners to notify. The service holds configuration only; every candidate
//! set and the current time are passed in per call.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::alerts::{self, AreaReport};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{AlertArea, AlertAreaOwner, Coordinate, MatchResult, SightingReport};
use crate::spatial::{geohash, haversine, make_circle_polygon};

/// What the workflow layer should do with a new sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreeningOutcome {
    /// An earlier report already covers this sighting. The submitter should
    /// be warned; nobody is matched.
    Duplicate {
        of: String,
        distance_km: f64,
    },
    /// The sighting is new. `matches` lists the owners to notify, nearest first.
    Accepted {
        geohash: String,
        matches: Vec<MatchResult>,
    },
}

#[derive(Debug, Clone)]
pub struct SightingScreener {
    config: EngineConfig,
}

impl SightingScreener {
    pub fn new(config: Option<EngineConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs duplicate detection, then matching if the sighting is new.
    pub fn screen(
        &self,
        location: Coordinate,
        owners: &[AlertAreaOwner],
        recent_reports: &[SightingReport],
        now: OffsetDateTime,
    ) -> ScreeningOutcome {
        if let Some(existing) = self.duplicate_of(location, recent_reports, now) {
            return ScreeningOutcome::Duplicate {
                of: existing.id.clone(),
                distance_km: haversine(location, existing.location),
            };
        }

        ScreeningOutcome::Accepted {
            geohash: self.geohash(location),
            matches: self.matches(location, owners, now),
        }
    }

    pub fn matches(
        &self,
        location: Coordinate,
        owners: &[AlertAreaOwner],
        now: OffsetDateTime,
    ) -> Vec<MatchResult> {
        alerts::find_matches(location, owners, now)
    }

    /// The first recent report within the configured duplicate window.
    pub fn duplicate_of<'a>(
        &self,
        location: Coordinate,
        recent_reports: &'a [SightingReport],
        now: OffsetDateTime,
    ) -> Option<&'a SightingReport> {
        alerts::is_duplicate_within(location, recent_reports, &self.config.duplicate_window(), now)
    }

    /// Geohash at the configured precision, as stored with new reports.
    pub fn geohash(&self, location: Coordinate) -> String {
        geohash::encode(location.lat, location.lng, self.config.geohash_precision)
    }

    pub fn validate_area(&self, area: &AlertArea) -> AreaReport {
        area.report(self.config.circle_steps)
    }

    /// Renders a circle as a polygon ring for uniform storage. Unlike the
    /// matching path this rejects bad input, since it runs at setup time.
    pub fn circle_area(
        &self,
        center: Coordinate,
        radius_km: f64,
        steps: Option<usize>,
    ) -> Result<Vec<Coordinate>, EngineError> {
        AlertArea::Circle { center, radius_km }.check()?;
        let steps = steps.unwrap_or(self.config.circle_steps);
        if steps < 3 {
            return Err(EngineError::InvalidArea(format!(
                "circle needs at least 3 steps, got {}",
                steps
            )));
        }
        Ok(make_circle_polygon(center, radius_km, steps))
    }
}
