//! Cache Key Module
//!
//! Quantizes coordinate pairs so that near-identical positions share a key.

use std::fmt;

use crate::config::MAX_COORDINATE_PRECISION;
use crate::error::{CacheError, Result};

// == Coordinate Validation ==
/// Rejects non-finite or out-of-range coordinates.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CacheError::InvalidCoordinates(format!(
            "latitude {} is outside [-90, 90]",
            latitude
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CacheError::InvalidCoordinates(format!(
            "longitude {} is outside [-180, 180]",
            longitude
        )));
    }
    Ok(())
}

// == Cache Key ==
/// Coordinate pair quantized to a fixed number of decimal digits.
///
/// Stored as scaled integers so the key is `Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat: i64,
    lon: i64,
    precision: u32,
}

impl CacheKey {
    // == Constructor ==
    /// Validates and quantizes a coordinate pair.
    ///
    /// Rounds half away from zero. Precision is capped at
    /// `MAX_COORDINATE_PRECISION`.
    pub fn from_coordinates(latitude: f64, longitude: f64, precision: u32) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;

        let precision = precision.min(MAX_COORDINATE_PRECISION);
        let scale = scale(precision);

        Ok(Self {
            lat: (latitude * scale).round() as i64,
            lon: (longitude * scale).round() as i64,
            precision,
        })
    }

    /// Quantized latitude.
    pub fn latitude(&self) -> f64 {
        self.lat as f64 / scale(self.precision)
    }

    /// Quantized longitude.
    pub fn longitude(&self) -> f64 {
        self.lon as f64 / scale(self.precision)
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.precision as usize;
        write!(
            f,
            "{:.*},{:.*}",
            digits,
            self.latitude(),
            digits,
            self.longitude()
        )
    }
}

fn scale(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}
