//! Share links for navigation apps
//!
//! Navigation apps only understand decimal degrees, so DMS input is converted
//! before the links are built.

use serde::Serialize;

use crate::convert::FormatConverter;
use crate::error::FormatError;

/// Share links generated for one coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapLinks {
    /// The coordinate rendered in the opposite notation of the input
    pub converted: String,
    /// Decimal-degree form used in the links
    pub decimal: String,
    pub waze: String,
    pub google_maps: String,
    pub apple_maps: String,
}

impl MapLinks {
    /// Build links for a DD or DMS coordinate string
    pub fn for_coordinates(coordinates: &str) -> Result<Self, FormatError> {
        let converted = FormatConverter::convert(coordinates)?;

        let decimal = if coordinates.contains('°') {
            converted.clone()
        } else {
            // validated by the conversion above
            coordinates.split_whitespace().collect::<String>()
        };

        Ok(Self {
            waze: format!("https://waze.com/ul?ll={decimal}&navigate=yes"),
            google_maps: format!("https://www.google.com/maps?q={decimal}"),
            apple_maps: format!("https://maps.apple.com/place?coordinate={decimal}"),
            converted,
            decimal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_sync;

    #[test]
    fn test_links_from_decimal() {
        let links = MapLinks::for_coordinates("40.7128, -74.0060").unwrap();
        assert_eq!(links.decimal, "40.7128,-74.0060");
        assert_eq!(links.converted, "40°42'46.08\"N, 74°0'21.60\"W");
        assert_eq!(
            links.waze,
            "https://waze.com/ul?ll=40.7128,-74.0060&navigate=yes"
        );
        assert_eq!(links.google_maps, "https://www.google.com/maps?q=40.7128,-74.0060");
        assert_eq!(
            links.apple_maps,
            "https://maps.apple.com/place?coordinate=40.7128,-74.0060"
        );
    }

    #[test]
    fn test_links_from_dms() {
        let links = MapLinks::for_coordinates("40°42'46.08\"N, 74°0'21.60\"W").unwrap();
        assert_eq!(links.decimal, "40.712800,-74.006000");
        assert_eq!(links.converted, links.decimal);
    }

    #[test]
    fn test_links_extract_back_to_decimal() {
        let links = MapLinks::for_coordinates("-33.8568,151.2153").unwrap();
        assert_eq!(extract_sync(&links.waze), links.decimal);
        assert_eq!(extract_sync(&links.apple_maps), links.decimal);
        // www.google.com is not a maps host; the embedded-pair scan picks it up
        assert_eq!(extract_sync(&links.google_maps), links.decimal);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert!(MapLinks::for_coordinates("somewhere").is_err());
    }
}
