use flockwatch::config::EngineConfig;
use flockwatch::models::{AlertArea, Coordinate};
use flockwatch::service::{ScreeningOutcome, SightingScreener};
use time::Duration;

use crate::common::*;

#[test]
fn test_screen_new_sighting_notifies_nearest_first() {
    init();
    let screener = SightingScreener::new(None);
    let sighting = fell();
    let owners = vec![
        circle_owner("far-farm", north_of(sighting, 4.0), 5.0),
        square_owner("home-farm", sighting, 0.02),
    ];
    let history = vec![report("old", sighting, Duration::hours(6))];

    match screener.screen(sighting, &owners, &history, NOW) {
        ScreeningOutcome::Accepted { geohash, matches } => {
            assert_eq!(geohash, screener.geohash(sighting));
            let ids: Vec<&str> = matches.iter().map(|m| m.owner_id.as_str()).collect();
            assert_eq!(ids, vec!["home-farm", "far-farm"]);
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
}

#[test]
fn test_screen_duplicate_reports_prior_sighting() {
    init();
    let screener = SightingScreener::new(None);
    let sighting = fell();
    let owners = vec![circle_owner("home-farm", sighting, 1.0)];
    let history = vec![
        report("other-fell", north_of(sighting, 2.0), Duration::minutes(5)),
        report("same-sheep", north_of(sighting, 0.025), Duration::minutes(45)),
    ];

    match screener.screen(sighting, &owners, &history, NOW) {
        ScreeningOutcome::Duplicate { of, distance_km } => {
            assert_eq!(of, "same-sheep");
            assert!((distance_km - 0.025).abs() < 1e-9);
        }
        other => panic!("expected duplicate, got {:?}", other),
    }
}

#[test]
fn test_custom_config_changes_window_and_precision() {
    init();
    let config = EngineConfig {
        geohash_precision: 9,
        duplicate_max_distance_km: 0.5,
        duplicate_max_age_secs: 600,
        circle_steps: 16,
    };
    let screener = SightingScreener::new(Some(config));
    let sighting = fell();

    assert_eq!(screener.geohash(sighting).len(), 9);

    // 300m away counts with the wider radius, but 20 minutes is past the window
    let history = vec![report("nearby", north_of(sighting, 0.3), Duration::minutes(20))];
    assert!(screener.duplicate_of(sighting, &history, NOW).is_none());
    let history = vec![report("nearby", north_of(sighting, 0.3), Duration::minutes(5))];
    assert!(screener.duplicate_of(sighting, &history, NOW).is_some());

    let ring = screener.circle_area(sighting, 1.0, None).unwrap();
    assert_eq!(ring.len(), 17);
}

#[test]
fn test_unvalidated_oversized_window_still_screens() {
    init();
    let config = EngineConfig {
        duplicate_max_age_secs: 1_000_000_000_000,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());

    let screener = SightingScreener::new(Some(config));
    let sighting = fell();
    let history = vec![report("same-spot", sighting, Duration::days(365 * 50))];

    let existing = screener.duplicate_of(sighting, &history, NOW);
    assert_eq!(existing.map(|r| r.id.as_str()), Some("same-spot"));
    assert!(matches!(
        screener.screen(sighting, &[], &history, NOW),
        ScreeningOutcome::Duplicate { .. }
    ));
}

#[test]
fn test_validate_area_for_setup_workflow() {
    init();
    let screener = SightingScreener::new(None);

    let good = AlertArea::Circle { center: fell(), radius_km: 2.0 };
    let report = screener.validate_area(&good);
    assert!(report.valid);
    assert!(report.bounding_box.contains(fell()));

    let bad = AlertArea::Polygon {
        ring: vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 1.0)],
    };
    let report = screener.validate_area(&bad);
    assert!(!report.valid);
    assert!(report.reason.unwrap().contains("at least 4"));
}
