use time::{Duration, OffsetDateTime};

use crate::alerts::{DEFAULT_DUPLICATE_DISTANCE_KM, DEFAULT_DUPLICATE_MAX_AGE_SECS};
use crate::models::{Coordinate, SightingReport};
use crate::spatial::{geohash, haversine};

/// The space and time tolerance within which two reports are treated as the
/// same real-world sighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateWindow {
    pub max_distance_km: f64,
    pub max_age: Duration,
}

impl Default for DuplicateWindow {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_DUPLICATE_DISTANCE_KM,
            max_age: Duration::seconds(DEFAULT_DUPLICATE_MAX_AGE_SECS),
        }
    }
}

/// Returns the first report in `recent_reports`, in iteration order, that is
/// no older than `max_age` at `now` and lies within `max_distance_km` of
/// `new_sighting`.
///
/// This is a linear scan, O(n) per call. Callers that care which of several
/// qualifying reports is returned must order the input themselves. To cut the
/// candidate set down first, see [`candidates_by_prefix`].
pub fn is_duplicate<'a, I>(
    new_sighting: Coordinate,
    recent_reports: I,
    max_distance_km: f64,
    max_age: Duration,
    now: OffsetDateTime,
) -> Option<&'a SightingReport>
where
    I: IntoIterator<Item = &'a SightingReport>,
{
    // A window reaching past the earliest representable instant has no cutoff
    let cutoff = now.checked_sub(max_age);

    for report in recent_reports {
        if cutoff.map_or(false, |cutoff| report.created_at < cutoff) {
            log::debug!(
                "Report {} is older than the duplicate window ({})",
                report.id,
                report.created_at
            );
            continue;
        }

        let distance = haversine(new_sighting, report.location);
        if distance <= max_distance_km {
            log::info!(
                "Sighting at ({}, {}) duplicates report {} ({:.1}m away)",
                new_sighting.lat,
                new_sighting.lng,
                report.id,
                distance * 1000.0
            );
            return Some(report);
        }
    }

    None
}

/// [`is_duplicate`] with the limits taken from `window`.
pub fn is_duplicate_within<'a, I>(
    new_sighting: Coordinate,
    recent_reports: I,
    window: &DuplicateWindow,
    now: OffsetDateTime,
) -> Option<&'a SightingReport>
where
    I: IntoIterator<Item = &'a SightingReport>,
{
    is_duplicate(new_sighting, recent_reports, window.max_distance_km, window.max_age, now)
}

/// Narrows `reports` to those whose stored geohash shares its first
/// `prefix_len` characters with `hash`.
///
/// Sightings just either side of a cell boundary land in different cells, so
/// this can drop a genuine duplicate; it trades recall for a smaller scan.
pub fn candidates_by_prefix<'a>(
    reports: &'a [SightingReport],
    hash: &'a str,
    prefix_len: usize,
) -> impl Iterator<Item = &'a SightingReport> + 'a {
    reports
        .iter()
        .filter(move |report| geohash::shares_prefix(&report.geohash, hash, prefix_len))
}
