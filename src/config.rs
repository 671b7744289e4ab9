//! Configuration management for the flockwatch engine.
//!
//! Configuration is read from environment variables with sensible defaults.
//! All parameters can be customized through environment variables with the
//! FLOCKWATCH_ prefix, and a `.env` file is honoured for local development.
//!
//! # Environment Variables
//! - FLOCKWATCH_GEOHASH_PRECISION: Characters per stored geohash (default: 7)
//! - FLOCKWATCH_DUPLICATE_MAX_DISTANCE_KM: Duplicate radius (default: 0.05)
//! - FLOCKWATCH_DUPLICATE_MAX_AGE_SECS: Duplicate time window (default: 7200)
//! - FLOCKWATCH_CIRCLE_STEPS: Vertices when rendering circles as polygons (default: 64)

use serde::Deserialize;
use std::env;
use time::Duration;

use crate::alerts::{DuplicateWindow, DEFAULT_DUPLICATE_DISTANCE_KM, DEFAULT_DUPLICATE_MAX_AGE_SECS};
use crate::error::EngineError;
use crate::spatial::geohash::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::spatial::DEFAULT_CIRCLE_STEPS;

/// Prefix for all flockwatch environment variables.
const ENV_PREFIX: &str = "FLOCKWATCH_";

/// Longest duplicate window accepted from configuration (one leap year).
pub const MAX_DUPLICATE_MAX_AGE_SECS: i64 = 366 * 24 * 60 * 60;

/// Tunables for the matching engine.
///
/// None of these change the algorithms themselves; they only supply the
/// defaults the screening service passes into the pure engine functions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of characters in the geohash stored with each sighting.
    /// Must be between 1 and 12.
    pub geohash_precision: usize,

    /// Two sightings closer than this are candidates for duplication.
    /// Must be positive. Specified in kilometers.
    pub duplicate_max_distance_km: f64,

    /// Prior reports older than this are never considered duplicates.
    /// Must be positive and at most one leap year. Specified in seconds.
    pub duplicate_max_age_secs: i64,

    /// Number of vertices used when a circle is rendered as a polygon.
    /// Must be at least 3.
    pub circle_steps: usize,
}

impl EngineConfig {
    /// Attempts to load configuration from environment variables.
    ///
    /// Variables that are absent keep their default value; variables that are
    /// present but malformed, or that fail validation, produce an error.
    pub fn from_env() -> Result<Self, EngineError> {
        dotenv::dotenv().ok();

        let env_vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .map(|(k, v)| (k.trim_start_matches(ENV_PREFIX).to_string(), v))
            .collect();

        let config = envy::from_iter::<_, Self>(env_vars)
            .map_err(|e| {
                EngineError::Config(format!("Failed to parse environment variables: {}", e))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the environment, falling back to defaults
    /// if anything is missing or invalid.
    pub fn from_env_or_default() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    /// Checks every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.geohash_precision == 0 || self.geohash_precision > MAX_PRECISION {
            return Err(EngineError::Config(format!(
                "geohash_precision must be between 1 and {}",
                MAX_PRECISION
            )));
        }
        if !(self.duplicate_max_distance_km > 0.0) || !self.duplicate_max_distance_km.is_finite() {
            return Err(EngineError::Config(
                "duplicate_max_distance_km must be positive".to_string(),
            ));
        }
        if !(1..=MAX_DUPLICATE_MAX_AGE_SECS).contains(&self.duplicate_max_age_secs) {
            return Err(EngineError::Config(format!(
                "duplicate_max_age_secs must be between 1 and {}",
                MAX_DUPLICATE_MAX_AGE_SECS
            )));
        }
        if self.circle_steps < 3 {
            return Err(EngineError::Config("circle_steps must be at least 3".to_string()));
        }
        Ok(())
    }

    /// The duplicate window these settings describe.
    pub fn duplicate_window(&self) -> DuplicateWindow {
        DuplicateWindow {
            max_distance_km: self.duplicate_max_distance_km,
            max_age: Duration::seconds(self.duplicate_max_age_secs),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geohash_precision: DEFAULT_PRECISION,
            duplicate_max_distance_km: DEFAULT_DUPLICATE_DISTANCE_KM,
            duplicate_max_age_secs: DEFAULT_DUPLICATE_MAX_AGE_SECS,
            circle_steps: DEFAULT_CIRCLE_STEPS,
        }
    }
}
