use time::OffsetDateTime;

use crate::models::{AlertAreaOwner, Coordinate, MatchResult};

/// Finds every eligible owner whose alert area contains `sighting`, nearest
/// first.
///
/// Owners are skipped, never rejected: ineligible subscriptions, mutes still
/// running at `now`, missing areas and malformed areas all simply produce no
/// result. Distances are measured to the polygon's vertex centroid or the
/// circle's center. The sort is stable, so owners at equal distances keep
/// their input order.
pub fn find_matches(
    sighting: Coordinate,
    owners: &[AlertAreaOwner],
    now: OffsetDateTime,
) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = owners
        .iter()
        .filter(|owner| {
            let eligible = owner.eligibility.is_eligible(now);
            if !eligible {
                log::debug!(
                    "Skipping owner {}: not eligible at {} ({:?}, muted_until={:?})",
                    owner.id,
                    now,
                    owner.eligibility.subscription_state,
                    owner.eligibility.muted_until
                );
            }
            eligible
        })
        .filter_map(|owner| {
            let Some(area) = &owner.area else {
                log::debug!("Skipping owner {}: no alert area configured", owner.id);
                return None;
            };

            match area.match_distance(sighting) {
                Some(distance_km) => {
                    log::debug!("Owner {} matches ({:.3}km to anchor)", owner.id, distance_km);
                    Some(MatchResult {
                        owner_id: owner.id.clone(),
                        distance_km,
                    })
                }
                None => {
                    log::debug!(
                        "Owner {}: area does not contain ({}, {})",
                        owner.id,
                        sighting.lat,
                        sighting.lng
                    );
                    None
                }
            }
        })
        .collect();

    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    log::info!(
        "Sighting at ({}, {}) matched {} of {} owners",
        sighting.lat,
        sighting.lng,
        matches.len(),
        owners.len()
    );
    matches
}
