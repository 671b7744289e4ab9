//! Data models for the flockwatch engine.
//! Defines the value types exchanged between the engine and the workflow
//! layer that feeds it: coordinates, alert areas and their owners, sighting
//! reports and match results.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::EngineError;
use crate::spatial::geohash;

/// Geographic location represented by latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, EngineError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(EngineError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Re-checks an already constructed coordinate (e.g. one deserialized
    /// from a request body).
    pub fn validated(self) -> Result<Self, EngineError> {
        Self::try_new(self.lat, self.lng)
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lng, y: c.lat }
    }
}

/// The geofenced region an owner registers for sighting notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertArea {
    /// Closed ring: at least four coordinates, first equal to last.
    Polygon { ring: Vec<Coordinate> },
    /// Everything within `radius_km` of `center`.
    Circle { center: Coordinate, radius_km: f64 },
}

/// Billing state of an alert area owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionState {
    Active,
    Trial,
    Cancelled,
    Expired,
}

/// Whether an owner should currently receive alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub subscription_state: SubscriptionState,
    /// Alerts are suppressed until this instant
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub muted_until: Option<OffsetDateTime>,
}

impl Eligibility {
    /// Active or trial subscriptions that are not muted at `now`.
    ///
    /// A mute that ends exactly at `now` no longer applies.
    pub fn is_eligible(&self, now: OffsetDateTime) -> bool {
        let subscribed = matches!(
            self.subscription_state,
            SubscriptionState::Active | SubscriptionState::Trial
        );
        let muted = self.muted_until.map_or(false, |until| until > now);
        subscribed && !muted
    }
}

/// A farmer (or anyone else) who owns at most one alert area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertAreaOwner {
    pub id: String,
    /// None while the owner has not finished setting up their area
    #[serde(default)]
    pub area: Option<AlertArea>,
    pub eligibility: Eligibility,
}

/// A walker's report of a stray sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightingReport {
    pub id: String,
    pub location: Coordinate,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Geohash of `location`, stored for coarse index lookups
    pub geohash: String,
}

impl SightingReport {
    /// Creates a report, computing its geohash at `precision` characters.
    pub fn new(
        id: impl Into<String>,
        location: Coordinate,
        created_at: OffsetDateTime,
        precision: usize,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            created_at,
            geohash: geohash::encode(location.lat, location.lng, precision),
        }
    }
}

/// An owner whose area contains a sighting, with the ranking distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub owner_id: String,
    /// Distance from the sighting to the area's centroid or center
    pub distance_km: f64,
}

/// Axis-aligned latitude/longitude extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Inclusive on every edge.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

impl From<BoundingBox> for geo::Rect<f64> {
    fn from(b: BoundingBox) -> Self {
        geo::Rect::new(
            geo::coord! { x: b.min_lng, y: b.min_lat },
            geo::coord! { x: b.max_lng, y: b.max_lat },
        )
    }
}

/// Request body for `POST /engine/screen`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub location: Coordinate,
    #[serde(default)]
    pub owners: Vec<AlertAreaOwner>,
    #[serde(default)]
    pub recent_reports: Vec<SightingReport>,
    /// Evaluation time; the server clock when omitted
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub now: Option<OffsetDateTime>,
}

/// Request body for `POST /engine/matches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub location: Coordinate,
    #[serde(default)]
    pub owners: Vec<AlertAreaOwner>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub now: Option<OffsetDateTime>,
}

/// Request body for `POST /engine/duplicate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateRequest {
    pub location: Coordinate,
    #[serde(default)]
    pub recent_reports: Vec<SightingReport>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub now: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateResponse {
    pub duplicate_of: Option<SightingReport>,
}

/// Request body for `POST /engine/areas/circle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleRequest {
    pub center: Coordinate,
    pub radius_km: f64,
    /// Number of vertices; the configured default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleResponse {
    pub ring: Vec<Coordinate>,
}

/// Query string for `GET /engine/geohash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeohashQuery {
    pub lat: f64,
    pub lng: f64,
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeohashResponse {
    pub geohash: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}
