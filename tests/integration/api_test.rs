use actix_web::{http::StatusCode, test, web, App};
use flockwatch::{
    api,
    models::{AlertArea, CircleRequest, Coordinate, DuplicateRequest, MatchRequest, ScreenRequest},
    service::SightingScreener,
};
use serde_json::{json, Value};
use time::Duration;

use crate::common::*;

macro_rules! engine_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(SightingScreener::new(None)))
                .configure(api::configure)
                .service(api::health),
        )
        .await
    };
}

#[actix_web::test]
async fn test_screen_endpoint_accepts_and_matches() {
    init();
    let app = engine_app!();

    let req = test::TestRequest::post()
        .uri("/engine/screen")
        .set_json(ScreenRequest {
            location: fell(),
            owners: vec![
                circle_owner("A", Coordinate::new(54.50, -2.50), 1.0),
                circle_owner("B", Coordinate::new(54.60, -2.50), 1.0),
            ],
            recent_reports: vec![],
            now: Some(NOW),
        });

    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["geohash"].as_str().unwrap().len(), 7);
    assert_eq!(body["matches"], json!([{ "owner_id": "A", "distance_km": 0.0 }]));
}

#[actix_web::test]
async fn test_screen_endpoint_flags_duplicate() {
    init();
    let app = engine_app!();

    let req = test::TestRequest::post()
        .uri("/engine/screen")
        .set_json(ScreenRequest {
            location: fell(),
            owners: vec![circle_owner("A", fell(), 1.0)],
            recent_reports: vec![report("earlier", north_of(fell(), 0.03), Duration::hours(1))],
            now: Some(NOW),
        });

    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["status"], "duplicate");
    assert_eq!(body["of"], "earlier");
}

#[actix_web::test]
async fn test_screen_endpoint_rejects_out_of_range_location() {
    init();
    let app = engine_app!();

    let req = test::TestRequest::post()
        .uri("/engine/screen")
        .set_json(json!({ "location": { "lat": 123.0, "lng": 0.0 } }));

    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_coordinate");
}

#[actix_web::test]
async fn test_matches_endpoint_respects_mute() {
    init();
    let app = engine_app!();

    let mut muted = circle_owner("muted", fell(), 1.0);
    muted.eligibility.muted_until = Some(NOW + Duration::hours(1));
    let owners = vec![muted, circle_owner("open", north_of(fell(), 0.5), 1.0)];

    let req = test::TestRequest::post()
        .uri("/engine/matches")
        .set_json(MatchRequest { location: fell(), owners: owners.clone(), now: Some(NOW) });
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["owner_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["open"]);

    let req = test::TestRequest::post()
        .uri("/engine/matches")
        .set_json(MatchRequest { location: fell(), owners, now: Some(NOW + Duration::hours(2)) });
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["owner_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["muted", "open"]);
}

#[actix_web::test]
async fn test_duplicate_endpoint() {
    init();
    let app = engine_app!();

    let req = test::TestRequest::post()
        .uri("/engine/duplicate")
        .set_json(DuplicateRequest {
            location: fell(),
            recent_reports: vec![report("stale", fell(), Duration::hours(3))],
            now: Some(NOW),
        });
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert!(body["duplicate_of"].is_null());

    let req = test::TestRequest::post()
        .uri("/engine/duplicate")
        .set_json(DuplicateRequest {
            location: fell(),
            recent_reports: vec![report("fresh", fell(), Duration::minutes(3))],
            now: Some(NOW),
        });
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["duplicate_of"]["id"], "fresh");
}

#[actix_web::test]
async fn test_area_endpoints() {
    init();
    let app = engine_app!();

    let req = test::TestRequest::post()
        .uri("/engine/areas/validate")
        .set_json(AlertArea::Polygon { ring: vec![fell(), north_of(fell(), 1.0), fell()] });
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["valid"], false);
    assert!(body["reason"].as_str().is_some());

    let req = test::TestRequest::post()
        .uri("/engine/areas/circle")
        .set_json(CircleRequest { center: fell(), radius_km: 1.0, steps: Some(8) });
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let ring = body["ring"].as_array().unwrap();
    assert_eq!(ring.len(), 9);
    assert_eq!(ring[0], ring[8]);

    let req = test::TestRequest::post()
        .uri("/engine/areas/circle")
        .set_json(CircleRequest { center: fell(), radius_km: -1.0, steps: None });
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_geohash_endpoint() {
    init();
    let app = engine_app!();

    let req = test::TestRequest::get()
        .uri("/engine/geohash?lat=57.64911&lng=10.40744&precision=11");
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["geohash"], "u4pruydqqvj");

    let req = test::TestRequest::get().uri("/engine/geohash?lat=54.5&lng=-2.5");
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["geohash"].as_str().unwrap().len(), 7);

    let req = test::TestRequest::get().uri("/engine/geohash?lat=54.5&lng=-2.5&precision=20");
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = engine_app!();
    let req = test::TestRequest::get().uri("/health");
    let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["status"], "ok");
}
