//! Coordinates and distance
//!
//! This module handles:
//! - The (latitude, longitude) pair used across the public API
//! - Bucketing coordinates into cache keys
//! - Great-circle distance (see [`distance`])

pub mod distance;

use crate::constants::geo::CACHE_KEY_PRECISION;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate that coordinates are finite and within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lon.is_finite() || self.lon < -180.0 || self.lon > 180.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }

    /// Cache bucket for these coordinates
    ///
    /// Both components are rounded to two decimals, so queries within roughly
    /// a kilometer of each other share one slot. The format is stable across
    /// runs because it also keys the on-disk cache.
    pub fn cache_key(&self) -> String {
        format!("{:.2},{:.2}", round_key(self.lat), round_key(self.lon))
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

fn round_key(value: f64) -> f64 {
    let scale = 10f64.powi(CACHE_KEY_PRECISION);
    // Adding 0.0 folds -0.0 into 0.0 so "-0.00" never appears in a key
    (value * scale).round() / scale + 0.0
}
