// Re-export the matching engine's two entry points
mod area;
mod matcher;
mod duplicate;

pub use area::AreaReport;
pub use matcher::find_matches;
pub use duplicate::{candidates_by_prefix, is_duplicate, is_duplicate_within, DuplicateWindow};

// Constants
/// Default radius within which two sightings may be the same event (50m)
pub const DEFAULT_DUPLICATE_DISTANCE_KM: f64 = 0.05;

/// Default age beyond which a prior report is never a duplicate
pub const DEFAULT_DUPLICATE_MAX_AGE_SECS: i64 = 2 * 60 * 60;
