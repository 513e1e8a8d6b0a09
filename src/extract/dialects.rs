//! Map-service URL dialects
//!
//! Each dialect pairs a hostname matcher with an extractor. The table is
//! evaluated in order; a dialect whose host matches but which finds nothing
//! falls through to the next entry and finally to the generic scans.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use super::{parse_coordinate, query_param};
use crate::models::Coordinate;

static GOOGLE_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("Google @ regex should compile")
});

static GOOGLE_PLACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/place/(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)")
        .expect("Google place regex should compile")
});

static ANY_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("pair regex should compile")
});

static OSM_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(-?[0-9]+\.?[0-9]*)/(-?[0-9]+\.?[0-9]*)")
        .expect("OSM fragment regex should compile")
});

static EMBEDDED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]+\.[0-9]{4,})\s*,\s*(-?[0-9]+\.[0-9]{4,})")
        .expect("embedded pair regex should compile")
});

/// A mapping-service URL convention
pub(crate) struct Dialect {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub extract: fn(&Url) -> Option<Coordinate>,
}

/// Dialects in priority order
pub(crate) static DIALECTS: &[Dialect] = &[
    Dialect {
        name: "google-maps",
        matches: is_google_maps,
        extract: google_maps,
    },
    Dialect {
        name: "waze",
        matches: is_waze,
        extract: waze,
    },
    Dialect {
        name: "apple-maps",
        matches: is_apple_maps,
        extract: apple_maps,
    },
    Dialect {
        name: "openstreetmap",
        matches: is_openstreetmap,
        extract: openstreetmap,
    },
    Dialect {
        name: "bing-maps",
        matches: is_bing_maps,
        extract: bing_maps,
    },
];

pub(crate) fn is_google_maps(host: &str) -> bool {
    host.contains("google") && host.contains("maps")
}

fn is_waze(host: &str) -> bool {
    host.contains("waze")
}

fn is_apple_maps(host: &str) -> bool {
    host.contains("apple") && host.contains("maps")
}

fn is_openstreetmap(host: &str) -> bool {
    host.contains("openstreetmap")
}

fn is_bing_maps(host: &str) -> bool {
    host.contains("bing") && host.contains("maps")
}

pub(crate) fn is_shortened(host: &str) -> bool {
    host.contains("goo.gl")
}

/// First candidate pair captured by `pattern` that is in range
fn first_valid_pair(pattern: &Regex, haystack: &str) -> Option<Coordinate> {
    pattern
        .captures_iter(haystack)
        .find_map(|caps| Coordinate::from_parts(&caps[1], &caps[2]))
}

fn google_maps(url: &Url) -> Option<Coordinate> {
    if let Some(coordinate) = query_param(url, "q").and_then(|q| parse_coordinate(&q)) {
        return Some(coordinate);
    }

    let path = url.path();
    first_valid_pair(&GOOGLE_AT, path)
        .or_else(|| first_valid_pair(&GOOGLE_PLACE, path))
        .or_else(|| first_valid_pair(&ANY_PAIR, path))
}

fn waze(url: &Url) -> Option<Coordinate> {
    query_param(url, "ll").and_then(|ll| parse_coordinate(&ll))
}

fn apple_maps(url: &Url) -> Option<Coordinate> {
    query_param(url, "ll")
        .and_then(|ll| parse_coordinate(&ll))
        .or_else(|| query_param(url, "coordinate").and_then(|c| parse_coordinate(&c)))
}

fn openstreetmap(url: &Url) -> Option<Coordinate> {
    if let (Some(mlat), Some(mlon)) = (query_param(url, "mlat"), query_param(url, "mlon")) {
        if let Some(coordinate) = Coordinate::from_parts(&mlat, &mlon) {
            return Some(coordinate);
        }
    }

    url.fragment()
        .and_then(|fragment| first_valid_pair(&OSM_FRAGMENT, fragment))
}

fn bing_maps(url: &Url) -> Option<Coordinate> {
    query_param(url, "cp").and_then(|cp| parse_coordinate(&cp.replacen('~', ",", 1)))
}

/// `lat`/`latitude` + `lon`/`lng`/`longitude` query parameters on any host
pub(crate) fn generic_query(url: &Url) -> Option<Coordinate> {
    let lat = query_param(url, "lat").or_else(|| query_param(url, "latitude"))?;
    let lon = query_param(url, "lon")
        .or_else(|| query_param(url, "lng"))
        .or_else(|| query_param(url, "longitude"))?;

    Coordinate::from_parts(&lat, &lon)
}

/// Two comma-separated decimals with at least four fractional digits each
pub(crate) fn embedded_pair(input: &str) -> Option<Coordinate> {
    first_valid_pair(&EMBEDDED_PAIR, input)
}
