//! Geospatial alert matching for stray-sheep sightings.
//!
//! The engine answers two questions about a new sighting: has somebody
//! already reported it, and whose alert areas contain it. Every operation is
//! a pure function of its arguments, including the current time, so it can
//! be called from any number of requests at once.

pub mod alerts;   // Alert matcher and duplicate detector
pub mod api;      // HTTP endpoint handlers
pub mod config;   // Configuration management
pub mod error;    // Error types and handling
pub mod models;   // Data structures and types
pub mod service;  // Sighting screening flow
pub mod spatial;  // Geohash, distance and polygon primitives
