//! Geohash codec.
//!
//! A geohash interleaves longitude and latitude bisection bits (longitude
//! first) and packs them five at a time into the base-32 alphabet below.
//! Longer hashes name smaller cells, and every hash is a prefix of the hashes
//! of all points inside its cell, which makes prefixes usable as coarse index
//! keys. A cell is never a substitute for an exact containment test.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Coordinate;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Precision used for stored sighting hashes (~153m x 153m at the equator)
pub const DEFAULT_PRECISION: usize = 7;

/// Longest hash accepted by configuration (cells of a few centimeters)
pub const MAX_PRECISION: usize = 12;

/// The latitude/longitude bounds of a decoded geohash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeohashCell {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeohashCell {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

/// Encodes a latitude/longitude pair into a geohash of `precision` characters.
pub fn encode(lat: f64, lng: f64, precision: usize) -> String {
    let mut hash = String::with_capacity(precision);
    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lng_range = (-180.0_f64, 180.0_f64);
    let mut is_lng = true;
    let mut bits = 0usize;
    let mut bit_count = 0;

    while hash.len() < precision {
        let (range, value) = if is_lng {
            (&mut lng_range, lng)
        } else {
            (&mut lat_range, lat)
        };
        let mid = (range.0 + range.1) / 2.0;
        bits <<= 1;
        if value >= mid {
            bits |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        is_lng = !is_lng;

        bit_count += 1;
        if bit_count == 5 {
            hash.push(BASE32[bits] as char);
            bits = 0;
            bit_count = 0;
        }
    }

    hash
}

/// Decodes a geohash back into the cell it names.
pub fn decode(hash: &str) -> Result<GeohashCell, EngineError> {
    if hash.is_empty() {
        return Err(EngineError::InvalidGeohash("empty geohash".to_string()));
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lng_range = (-180.0_f64, 180.0_f64);
    let mut is_lng = true;

    for c in hash.chars() {
        let lower = c.to_ascii_lowercase();
        let idx = BASE32
            .iter()
            .position(|&b| b as char == lower)
            .ok_or_else(|| {
                EngineError::InvalidGeohash(format!("unexpected character '{}' in {}", c, hash))
            })?;

        for shift in (0..5).rev() {
            let range = if is_lng { &mut lng_range } else { &mut lat_range };
            let mid = (range.0 + range.1) / 2.0;
            if (idx >> shift) & 1 == 1 {
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            is_lng = !is_lng;
        }
    }

    Ok(GeohashCell {
        min_lat: lat_range.0,
        max_lat: lat_range.1,
        min_lng: lng_range.0,
        max_lng: lng_range.1,
    })
}

/// True when both hashes are at least `len` characters long and agree on
/// their first `len` characters.
pub fn shares_prefix(a: &str, b: &str, len: usize) -> bool {
    a.len() >= len && b.len() >= len && a.as_bytes()[..len] == b.as_bytes()[..len]
}
