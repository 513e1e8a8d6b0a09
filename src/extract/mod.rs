//! Coordinate extraction from raw pairs and map-service URLs
//!
//! Extraction is advisory: it never fails. The synchronous path returns the
//! trimmed input unchanged when nothing could be extracted, the asynchronous
//! path returns `None`.

mod dialects;
mod scrape;

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use tracing::{debug, info, instrument};

use crate::decode::decode_until_stable;
use crate::models::Coordinate;
use crate::resolver::PageResolver;

static COORDINATE_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]+\.?[0-9]*)\s*,?\s*(-?[0-9]+\.?[0-9]*)$")
        .expect("coordinate regex should compile")
});

static DECIMAL_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]+\.?[0-9]*)\s*,\s*(-?[0-9]+\.?[0-9]*)$")
        .expect("decimal candidate regex should compile")
});

static DMS_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9]+°.*[NSEW]").expect("DMS candidate regex should compile")
});

const URL_MARKERS: [&str; 4] = ["://", "www.", "maps.", "goo.gl"];

/// Whether `input` looks like a URL rather than a raw coordinate pair
#[must_use]
pub fn is_url_like(input: &str) -> bool {
    URL_MARKERS.iter().any(|marker| input.contains(marker))
}

/// Parse `"lat,lon"` or `"lat lon"` into a range-checked coordinate string.
///
/// Returns `None` for anything that is not a pair of in-range decimals.
#[must_use]
pub fn parse_coordinate_string(input: &str) -> Option<String> {
    parse_coordinate(input).map(|coordinate| coordinate.canonical())
}

/// Gate applied to every candidate before the async path returns it.
///
/// Decimal pairs are range-checked and normalized; anything that looks like
/// DMS is passed through untouched for the format converter to handle.
#[must_use]
pub fn validate_candidate(candidate: &str) -> Option<String> {
    let cleaned = candidate.trim();

    if let Some(caps) = DECIMAL_CANDIDATE.captures(cleaned) {
        if let Some(coordinate) = Coordinate::from_parts(&caps[1], &caps[2]) {
            return Some(coordinate.canonical());
        }
    }

    if DMS_CANDIDATE.is_match(cleaned) {
        return Some(cleaned.to_string());
    }

    None
}

pub(crate) fn parse_coordinate(input: &str) -> Option<Coordinate> {
    let caps = COORDINATE_STRING.captures(input.trim())?;
    Coordinate::from_parts(&caps[1], &caps[2])
}

pub(crate) fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn parse_url(input: &str) -> Option<Url> {
    let trimmed = input.trim();
    Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{trimmed}")))
        .ok()
}

fn hostname(url: &Url) -> String {
    url.host_str().unwrap_or_default().to_lowercase()
}

/// Best-effort synchronous extraction.
///
/// Returns a `"lat,lon"` string when a coordinate was found and the
/// trimmed input otherwise. Shortened links are returned unchanged.
#[must_use]
pub fn extract_sync(input: &str) -> String {
    let trimmed = input.trim();

    if !is_url_like(input) {
        return trimmed.to_string();
    }

    let Some(url) = parse_url(input) else {
        debug!("Input is not a parseable URL: {}", trimmed);
        return trimmed.to_string();
    };

    let host = hostname(&url);
    if dialects::is_shortened(&host) {
        debug!("Shortened link needs resolution: {}", trimmed);
        return trimmed.to_string();
    }

    for dialect in dialects::DIALECTS.iter().filter(|d| (d.matches)(&host)) {
        if let Some(coordinate) = (dialect.extract)(&url) {
            debug!("Extracted {} using {} dialect", coordinate, dialect.name);
            return coordinate.canonical();
        }
    }

    if let Some(coordinate) = dialects::generic_query(&url) {
        debug!("Extracted {} from query parameters", coordinate);
        return coordinate.canonical();
    }

    if let Some(coordinate) = dialects::embedded_pair(input) {
        debug!("Extracted {} from embedded pair", coordinate);
        return coordinate.canonical();
    }

    debug!("No coordinates found in {}", trimmed);
    trimmed.to_string()
}

/// Decode a shared `?c=` value (possibly encoded several times) and
/// run it through synchronous extraction.
#[must_use]
pub fn extract_from_shared_value(value: &str, max_iterations: u32) -> String {
    extract_sync(&decode_until_stable(value, max_iterations))
}

/// Extracts coordinates from user input, following links through a
/// [`PageResolver`] when the URL itself carries none.
pub struct CoordinateExtractor<R> {
    resolver: R,
}

impl<R: PageResolver> CoordinateExtractor<R> {
    /// Create an extractor backed by `resolver`
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Extraction that may fetch pages: expands shortened links and scrapes
    /// page content when the URL carries no coordinates.
    #[instrument(skip(self))]
    pub async fn extract_async(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        let sync_result = extract_sync(input);

        if !is_url_like(input) {
            return validate_candidate(&sync_result);
        }

        if sync_result != trimmed {
            if let Some(validated) = validate_candidate(&sync_result) {
                return Some(validated);
            }
        }

        let url = parse_url(input)?;
        let host = hostname(&url);

        if dialects::is_shortened(&host) {
            if let Some(found) = self.from_shortened_link(url.as_str()).await {
                return Some(found);
            }
        }

        if dialects::is_google_maps(&host) {
            if let Some(found) = self.scrape_google_maps(url.as_str()).await {
                info!("Found {} on Google Maps page", found);
                return Some(found);
            }
        }

        let body = self.resolver.fetch_body(url.as_str()).await?;
        let found = scrape::page_geo_coordinates(&body)
            .and_then(|coordinate| validate_candidate(&coordinate.canonical()));
        if let Some(coordinates) = &found {
            info!("Found {} in page metadata", coordinates);
        } else {
            debug!("No coordinates found for {}", trimmed);
        }
        found
    }

    async fn from_shortened_link(&self, short_url: &str) -> Option<String> {
        let expanded = self.resolver.expand(short_url).await?;
        debug!("Expanded {} to {}", short_url, expanded);

        let from_url = validate_candidate(&extract_sync(&expanded))
            .filter(|validated| *validated != expanded);
        if let Some(found) = from_url {
            info!("Found {} in expanded link", found);
            return Some(found);
        }

        let found = self.scrape_google_maps(&expanded).await;
        if let Some(coordinates) = &found {
            info!("Found {} on expanded link page", coordinates);
        }
        found
    }

    async fn scrape_google_maps(&self, url: &str) -> Option<String> {
        let body = self.resolver.fetch_body(url).await?;
        scrape::google_maps_coordinates(&body)
            .and_then(|coordinate| validate_candidate(&coordinate.canonical()))
    }
}
