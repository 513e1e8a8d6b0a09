//! `CoordLink` - coordinates from map links
//!
//! This library extracts latitude/longitude pairs from raw input and
//! map-service URLs, and converts between decimal degrees and
//! degrees-minutes-seconds notation.

pub mod config;
pub mod convert;
pub mod decode;
pub mod error;
pub mod extract;
pub mod links;
pub mod models;
pub mod resolver;
pub mod telemetry;

// Re-export core types for public API
pub use config::CoordLinkConfig;
pub use convert::FormatConverter;
pub use decode::decode_until_stable;
pub use error::{CoordLinkError, FormatError};
pub use extract::{
    CoordinateExtractor, extract_from_shared_value, extract_sync, is_url_like,
    parse_coordinate_string, validate_candidate,
};
pub use links::MapLinks;
pub use models::Coordinate;
pub use resolver::{HttpResolver, PageResolver, ResolvedPage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CoordLinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
