//! Polyline representation for route geometries.
//!
//! Routing services ship geometry as a compressed polyline string. Decoding
//! happens here at the boundary; everything past the enricher works with
//! plain (latitude, longitude) points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

/// Raised when a compressed polyline string cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character {character:?} at byte {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("polyline ended in the middle of a value")]
    Truncated,

    #[error("polyline coordinate overflowed at byte {index}")]
    Overflow { index: usize },

    #[error("polyline point {index} lies outside latitude/longitude bounds")]
    OutOfRange { index: usize },
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Two-point straight line, used when no routed geometry is available.
    pub fn straight_line(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            points: vec![from, to],
        }
    }

    /// Decodes a compressed polyline at the given decimal precision
    /// (5 for the classic format, 6 for `polyline6`).
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, PolylineError> {
        let factor = 10_f64.powi(precision as i32);
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            let start = index;
            lat = lat
                .checked_add(decode_value(bytes, &mut index)?)
                .ok_or(PolylineError::Overflow { index: start })?;
            if index >= bytes.len() {
                return Err(PolylineError::Truncated);
            }
            let start = index;
            lng = lng
                .checked_add(decode_value(bytes, &mut index)?)
                .ok_or(PolylineError::Overflow { index: start })?;
            points.push((lat as f64 / factor, lng as f64 / factor));
        }

        let polyline = Self { points };
        polyline.check_bounds()?;
        Ok(polyline)
    }

    /// Fails on the first point outside latitude [-90, 90] or longitude
    /// [-180, 180].
    pub fn check_bounds(&self) -> Result<(), PolylineError> {
        match self
            .points
            .iter()
            .position(|&(lat, lng)| !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng))
        {
            Some(index) => Err(PolylineError::OutOfRange { index }),
            None => Ok(()),
        }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

/// Reads one zig-zag varint from `bytes`, advancing `index` past it.
fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: byte as char,
                index: *index,
            });
        }
        if shift > 60 {
            return Err(PolylineError::Overflow { index: *index });
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
