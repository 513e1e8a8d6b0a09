//! Coordinate scraping from fetched HTML
//!
//! Patterns are tried in order. Within a pattern, matches are visited in
//! document order and the first in-range candidate is returned.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::parse_coordinate;
use crate::models::Coordinate;

static AT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)").expect("@ pair regex should compile")
});

static META_CONTENT_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*content=["']([^"']*@-?[0-9]+\.?[0-9]*,-?[0-9]+\.?[0-9]*[^"']*)["']"#)
        .expect("meta content regex should compile")
});

static QUOTED_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""@(-?[0-9]+\.?[0-9]*),(-?[0-9]+\.?[0-9]*)""#)
        .expect("quoted @ regex should compile")
});

static LINK_HREF_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*href=["']([^"']*@-?[0-9]+\.?[0-9]*,-?[0-9]+\.?[0-9]*[^"']*)["']"#)
        .expect("link href regex should compile")
});

static PRECISE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]+\.[0-9]{6,}),(-?[0-9]+\.[0-9]{6,})")
        .expect("precise pair regex should compile")
});

static GEO_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']?geo\.position["']?[^>]*content=["']([^"']+)["']"#)
        .expect("geo.position regex should compile")
});

static ICBM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']?ICBM["']?[^>]*content=["']([^"']+)["']"#)
        .expect("ICBM regex should compile")
});

static SCHEMA_FLAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)"latitude"\s*:\s*"?(-?[0-9]+\.?[0-9]*)"?\s*,\s*"longitude"\s*:\s*"?(-?[0-9]+\.?[0-9]*)"?"#,
    )
    .expect("schema.org flat regex should compile")
});

static SCHEMA_GEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)"geo"\s*:\s*\{\s*"@type"\s*:\s*"GeoCoordinates"\s*,\s*"#,
        r#""latitude"\s*:\s*"?(-?[0-9]+\.?[0-9]*)"?\s*,\s*"longitude"\s*:\s*"?(-?[0-9]+\.?[0-9]*)"?"#,
    ))
    .expect("schema.org geo regex should compile")
});

fn first_valid_pair(pattern: &Regex, haystack: &str) -> Option<Coordinate> {
    pattern
        .captures_iter(haystack)
        .find_map(|caps| Coordinate::from_parts(&caps[1], &caps[2]))
}

/// Attribute values matched by `pattern` that carry an `@lat,lon` token
fn first_valid_at_in_attribute(pattern: &Regex, html: &str) -> Option<Coordinate> {
    pattern
        .captures_iter(html)
        .find_map(|caps| first_valid_pair(&AT_PAIR, &caps[1]))
}

/// `"lat;lon"` meta content, semicolon normalized to a comma
fn first_valid_meta_position(pattern: &Regex, html: &str) -> Option<Coordinate> {
    pattern
        .captures_iter(html)
        .find_map(|caps| parse_coordinate(&caps[1].replacen(';', ",", 1)))
}

/// Scrape a Google Maps page for the coordinates of the place it shows
pub(crate) fn google_maps_coordinates(html: &str) -> Option<Coordinate> {
    let strategies: [(&str, fn(&str) -> Option<Coordinate>); 4] = [
        ("meta content", |html: &str| first_valid_at_in_attribute(&META_CONTENT_AT, html)),
        ("quoted @ literal", |html: &str| first_valid_pair(&QUOTED_AT, html)),
        ("link href", |html: &str| first_valid_at_in_attribute(&LINK_HREF_AT, html)),
        ("precise pair", |html: &str| first_valid_pair(&PRECISE_PAIR, html)),
    ];

    run_strategies(&strategies, html)
}

/// Scrape any page for geo meta tags or schema.org coordinates
pub(crate) fn page_geo_coordinates(html: &str) -> Option<Coordinate> {
    let strategies: [(&str, fn(&str) -> Option<Coordinate>); 4] = [
        ("geo.position", |html: &str| first_valid_meta_position(&GEO_POSITION, html)),
        ("ICBM", |html: &str| first_valid_meta_position(&ICBM, html)),
        ("schema.org fields", |html: &str| first_valid_pair(&SCHEMA_FLAT, html)),
        ("schema.org GeoCoordinates", |html: &str| first_valid_pair(&SCHEMA_GEO, html)),
    ];

    run_strategies(&strategies, html)
}

fn run_strategies(
    strategies: &[(&str, fn(&str) -> Option<Coordinate>)],
    html: &str,
) -> Option<Coordinate> {
    strategies.iter().find_map(|(name, strategy)| {
        let found = strategy(html);
        if let Some(coordinate) = &found {
            debug!("Scraped {} via {}", coordinate, name);
        }
        found
    })
}
