//! Coordinate model for a validated latitude/longitude pair

use std::fmt;

use serde::{Deserialize, Serialize};

/// Latitude bound in degrees
pub const MAX_LATITUDE: f64 = 90.0;
/// Longitude bound in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair that is known to be in range.
///
/// The textual tokens the pair was parsed from are kept so that the canonical
/// form reproduces the input precision (`-74.0060` stays `-74.0060`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    lat_text: String,
    lon_text: String,
}

impl Coordinate {
    /// Parse a pair of decimal tokens, keeping their textual form.
    #[must_use]
    pub fn from_parts(lat: &str, lon: &str) -> Option<Self> {
        let lat_text = lat.trim();
        let lon_text = lon.trim();
        let latitude = lat_text.parse::<f64>().ok()?;
        let longitude = lon_text.parse::<f64>().ok()?;

        if !in_range(latitude, longitude) {
            return None;
        }

        Some(Self {
            latitude,
            longitude,
            lat_text: lat_text.to_string(),
            lon_text: lon_text.to_string(),
        })
    }

    /// Canonical `"lat,lon"` form with no surrounding whitespace
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{},{}", self.lat_text, self.lon_text)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat_text, self.lon_text)
    }
}

fn in_range(latitude: f64, longitude: f64) -> bool {
    (-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude)
        && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_keeps_input_precision() {
        let coordinate = Coordinate::from_parts(" 40.7128", "-74.0060 ").unwrap();
        assert_eq!(coordinate.canonical(), "40.7128,-74.0060");
        assert_eq!(coordinate.latitude, 40.7128);
        assert_eq!(coordinate.longitude, -74.006);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Coordinate::from_parts("90", "180").is_some());
        assert!(Coordinate::from_parts("-90", "-180").is_some());
        assert!(Coordinate::from_parts("90.0001", "0").is_none());
        assert!(Coordinate::from_parts("0", "-180.5").is_none());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert!(Coordinate::from_parts("NaN", "0").is_none());
        assert!(Coordinate::from_parts("0", "inf").is_none());
    }

    #[test]
    fn test_display_matches_canonical() {
        let coordinate = Coordinate::from_parts("46.8182", " 8.2275").unwrap();
        assert_eq!(coordinate.to_string(), "46.8182,8.2275");
    }
}
