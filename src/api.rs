//! API endpoints for the flockwatch engine.
//! Each endpoint evaluates one engine operation over the data in the request;
//! nothing is stored between requests. Bodies are JSON, timestamps RFC 3339.

use actix_web::{get, post, web, HttpResponse, Responder};
use time::OffsetDateTime;

use crate::error::EngineError;
use crate::models::{
    AlertArea, CircleRequest, CircleResponse, Coordinate, DuplicateRequest, DuplicateResponse,
    GeohashQuery, GeohashResponse, HealthStatus, MatchRequest, ScreenRequest,
};
use crate::service::SightingScreener;
use crate::spatial::geohash::MAX_PRECISION;

/// Registers every engine endpoint under `/engine`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/engine")
            .service(screen)
            .service(matches)
            .service(duplicate)
            .service(validate_area)
            .service(circle_area)
            .service(geohash),
    );
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Screens a new sighting: duplicate check first, then matching.
///
/// # Returns
/// - 200 OK with `{"status": "duplicate", ...}` or `{"status": "accepted", ...}`
/// - 400 Bad Request if the sighting location is out of range
#[post("/screen")]
pub async fn screen(
    request: web::Json<ScreenRequest>,
    service: web::Data<SightingScreener>,
) -> Result<HttpResponse, EngineError> {
    let request = request.into_inner();
    let location = request.location.validated()?;
    let now = request.now.unwrap_or_else(OffsetDateTime::now_utc);

    log::info!(
        "Screening request {}: ({}, {}) against {} owners and {} recent reports",
        request_id(),
        location.lat,
        location.lng,
        request.owners.len(),
        request.recent_reports.len()
    );

    let outcome = service.screen(location, &request.owners, &request.recent_reports, now);
    Ok(HttpResponse::Ok().json(outcome))
}

/// Ranks the owners whose alert areas contain the location.
#[post("/matches")]
pub async fn matches(
    request: web::Json<MatchRequest>,
    service: web::Data<SightingScreener>,
) -> Result<HttpResponse, EngineError> {
    let request = request.into_inner();
    let location = request.location.validated()?;
    let now = request.now.unwrap_or_else(OffsetDateTime::now_utc);

    log::info!("Match request {}: {} owners", request_id(), request.owners.len());
    Ok(HttpResponse::Ok().json(service.matches(location, &request.owners, now)))
}

/// Looks for an earlier report covering the same sighting.
#[post("/duplicate")]
pub async fn duplicate(
    request: web::Json<DuplicateRequest>,
    service: web::Data<SightingScreener>,
) -> Result<HttpResponse, EngineError> {
    let request = request.into_inner();
    let location = request.location.validated()?;
    let now = request.now.unwrap_or_else(OffsetDateTime::now_utc);

    log::info!(
        "Duplicate request {}: {} recent reports",
        request_id(),
        request.recent_reports.len()
    );
    let duplicate_of = service
        .duplicate_of(location, &request.recent_reports, now)
        .cloned();
    Ok(HttpResponse::Ok().json(DuplicateResponse { duplicate_of }))
}

/// Validates an alert area for the setup workflow. Invalid areas still get
/// a 200 with `valid: false` and the reason.
#[post("/areas/validate")]
pub async fn validate_area(
    area: web::Json<AlertArea>,
    service: web::Data<SightingScreener>,
) -> impl Responder {
    HttpResponse::Ok().json(service.validate_area(&area))
}

/// Renders a circle alert area as a polygon ring.
#[post("/areas/circle")]
pub async fn circle_area(
    request: web::Json<CircleRequest>,
    service: web::Data<SightingScreener>,
) -> Result<HttpResponse, EngineError> {
    let ring = service.circle_area(request.center, request.radius_km, request.steps)?;
    Ok(HttpResponse::Ok().json(CircleResponse { ring }))
}

/// Encodes a location as a geohash, at the configured precision unless the
/// query names one.
#[get("/geohash")]
pub async fn geohash(
    query: web::Query<GeohashQuery>,
    service: web::Data<SightingScreener>,
) -> Result<HttpResponse, EngineError> {
    let location = Coordinate::try_new(query.lat, query.lng)?;
    let precision = query.precision.unwrap_or(service.config().geohash_precision);
    if precision == 0 || precision > MAX_PRECISION {
        return Err(EngineError::InvalidGeohash(format!(
            "precision must be between 1 and {}",
            MAX_PRECISION
        )));
    }

    let geohash = crate::spatial::geohash::encode(location.lat, location.lng, precision);
    Ok(HttpResponse::Ok().json(GeohashResponse { geohash }))
}

/// Root-level health check for liveness checks.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
