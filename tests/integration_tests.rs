//! Integration tests for the CoordLink library and CLI

use std::collections::HashMap;
use std::process::Command;

use async_trait::async_trait;
use coordlink::{
    CoordLinkError, CoordinateExtractor, FormatConverter, FormatError, MapLinks, PageResolver,
    ResolvedPage, Result, VERSION, extract_from_shared_value, extract_sync, parse_coordinate_string,
};
use rstest::rstest;

/// Serves canned pages; unknown URLs fail like an unreachable host
#[derive(Default)]
struct CannedResolver {
    pages: HashMap<String, ResolvedPage>,
}

impl CannedResolver {
    fn redirect(mut self, from: &str, to: &str) -> Self {
        self.pages.insert(
            from.to_string(),
            ResolvedPage {
                final_url: to.to_string(),
                body: String::new(),
                status_code: 200,
            },
        );
        self
    }

    fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            ResolvedPage {
                final_url: url.to_string(),
                body: body.to_string(),
                status_code: 200,
            },
        );
        self
    }
}

#[async_trait]
impl PageResolver for CannedResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedPage> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CoordLinkError::network(format!("unreachable: {url}")))
    }
}

fn parse_pair(s: &str) -> (f64, f64) {
    let (lat, lon) = s.split_once(',').expect("pair should contain a comma");
    (lat.parse().unwrap(), lon.parse().unwrap())
}

#[rstest]
#[case("40.7128,-74.0060", "40.7128,-74.0060")]
#[case("https://www.google.com/maps/@40.7128,-74.0060,15z", "40.7128,-74.0060")]
#[case("https://waze.com/ul?ll=40.7128,-74.0060", "40.7128,-74.0060")]
#[case(
    "https://www.openstreetmap.org/?mlat=40.7128&mlon=-74.0060",
    "40.7128,-74.0060"
)]
fn test_extraction_scenarios(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(extract_sync(input), expected);
}

#[test]
fn test_conversion_scenarios() {
    assert_eq!(
        FormatConverter::convert("40.712800,-74.006000").unwrap(),
        "40°42'46.08\"N, 74°0'21.60\"W"
    );
    assert_eq!(
        FormatConverter::convert("40°42'46.08\"N, 74°0'21.60\"W").unwrap(),
        "40.712800,-74.006000"
    );
    assert!(matches!(
        FormatConverter::convert("not,a,coordinate,string"),
        Err(FormatError::PartCount { .. })
    ));
}

#[rstest]
#[case(0.0, 0.0)]
#[case(90.0, 180.0)]
#[case(-90.0, -180.0)]
#[case(-33.8568, 151.2153)]
#[case(51.500729, -0.124625)]
#[case(-0.000123, 0.999999)]
fn test_dms_round_trip_stays_close(#[case] lat: f64, #[case] lon: f64) {
    let dms = FormatConverter::decimal_to_dms(&format!("{lat},{lon}")).unwrap();
    let (back_lat, back_lon) = parse_pair(&FormatConverter::dms_to_decimal(&dms).unwrap());
    assert!((back_lat - lat).abs() < 1e-4, "{lat} -> {dms} -> {back_lat}");
    assert!((back_lon - lon).abs() < 1e-4, "{lon} -> {dms} -> {back_lon}");
}

#[rstest]
#[case("90.0001,0")]
#[case("-91,10")]
#[case("10,180.5")]
#[case("0,-181")]
fn test_out_of_range_pairs_are_rejected(#[case] input: &str) {
    assert_eq!(parse_coordinate_string(input), None);
}

#[test]
fn test_shared_value_decoding() {
    assert_eq!(
        extract_from_shared_value("https%253A%252F%252Fwaze.com%252Ful%253Fll%253D1.5%252C2.5", 10),
        "1.5,2.5"
    );
}

#[test]
fn test_share_links_round_trip() {
    let links = MapLinks::for_coordinates("48°51'30.12\"N, 2°17'40.20\"E").unwrap();
    assert_eq!(links.decimal, "48.858367,2.294500");
    for link in [&links.waze, &links.google_maps, &links.apple_maps] {
        assert_eq!(extract_sync(link), links.decimal, "{link}");
    }
}

#[tokio::test]
async fn test_shortened_link_end_to_end() {
    let resolver = CannedResolver::default()
        .redirect(
            "https://maps.app.goo.gl/xyz",
            "https://www.google.com/maps/place/Sydney+Opera+House",
        )
        .page(
            "https://www.google.com/maps/place/Sydney+Opera+House",
            r#"<link rel="canonical" href="https://www.google.com/maps/@-33.8567844,151.2152967,17z">"#,
        );
    let extractor = CoordinateExtractor::new(resolver);

    assert_eq!(
        extractor
            .extract_async("https://maps.app.goo.gl/xyz")
            .await
            .as_deref(),
        Some("-33.8567844,151.2152967")
    );
}

#[tokio::test]
async fn test_unreachable_link_yields_nothing() {
    let extractor = CoordinateExtractor::new(CannedResolver::default());
    assert_eq!(extractor.extract_async("https://goo.gl/maps/gone").await, None);
}

fn coordlink(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_coordlink"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute coordlink")
}

#[test]
fn test_cli_help() {
    let output = coordlink(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: coordlink"));
}

#[test]
fn test_cli_version() {
    let output = coordlink(&["--version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("coordlink {VERSION}")
    );
}

#[test]
fn test_cli_convert() {
    let output = coordlink(&["convert", "40.712800,-74.006000"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "40°42'46.08\"N, 74°0'21.60\"W"
    );
}

#[test]
fn test_cli_convert_reports_format_error() {
    let output = coordlink(&["convert", "not,a,coordinate,string"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid"));
}

#[test]
fn test_cli_extract_plain_pair_json() {
    let output = coordlink(&["--json", "extract", "40.7128, -74.0060"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["coordinates"], "40.7128,-74.0060");
    assert_eq!(value["dms"], "40°42'46.08\"N, 74°0'21.60\"W");
}

#[test]
fn test_cli_extract_not_found() {
    let output = coordlink(&["extract", "Eiffel Tower"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("manually"));
}

#[test]
fn test_cli_decode() {
    let output = coordlink(&["decode", "40.7128%252C-74.0060"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "40.7128,-74.0060");
}
