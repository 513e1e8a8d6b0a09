//! Decimal degrees <-> degrees/minutes/seconds conversion
//!
//! The direction of the conversion is detected from the input: anything
//! containing a degree sign is treated as DMS, everything else as DD.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::FormatError;

static DMS_AXIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)([0-9]{1,3})°\s*([0-9]{1,2})'\s*([0-9]{1,2}(?:\.[0-9]+)?)"\s*([NSEW])"#)
        .expect("DMS axis regex should compile")
});

const DECIMAL_PLACES: usize = 6;
const SECOND_PLACES: usize = 2;

/// Extra digits rendered to tell an exact half from a value just above it
const TIE_CHECK_DIGITS: usize = 40;

/// Stateless DD/DMS converter
pub struct FormatConverter;

impl FormatConverter {
    /// Convert between DD and DMS, detecting the input notation.
    ///
    /// DMS input without an inter-axis comma gets one inserted after the
    /// first `N` (or, failing that, the first `S`) before parsing.
    pub fn convert(coordinates: &str) -> Result<String, FormatError> {
        let is_dms = coordinates.contains('°');
        let has_comma = coordinates.contains(',');

        match (is_dms, has_comma) {
            (true, true) => Self::dms_to_decimal(coordinates),
            (true, false) => {
                // Brittle for single-axis input; kept for compatibility.
                let repaired = if coordinates.contains('N') {
                    coordinates.replacen('N', "N,", 1)
                } else {
                    coordinates.replacen('S', "S,", 1)
                };
                debug!("Inserted missing DMS axis separator: {}", repaired);
                Self::dms_to_decimal(&repaired)
            }
            (false, _) => Self::decimal_to_dms(coordinates),
        }
    }

    /// Convert `"40°42'46.08\"N, 74°0'21.60\"W"` to `"40.712800,-74.006000"`
    pub fn dms_to_decimal(dms: &str) -> Result<String, FormatError> {
        let (lat_part, lon_part) = split_pair(dms, "DMS")?;

        let latitude = parse_dms_axis(lat_part.trim())?;
        let longitude = parse_dms_axis(lon_part.trim())?;

        Ok(format!(
            "{},{}",
            to_fixed(latitude, DECIMAL_PLACES),
            to_fixed(longitude, DECIMAL_PLACES)
        ))
    }

    /// Convert `"40.7128,-74.0060"` to `"40°42'46.08\"N, 74°0'21.60\"W"`
    pub fn decimal_to_dms(decimal: &str) -> Result<String, FormatError> {
        let (lat_part, lon_part) = split_pair(decimal, "decimal")?;

        let latitude = parse_decimal(lat_part, decimal)?;
        let longitude = parse_decimal(lon_part, decimal)?;

        let lat_dms = format_dms_axis(latitude, if latitude < 0.0 { 'S' } else { 'N' });
        let lon_dms = format_dms_axis(longitude, if longitude < 0.0 { 'W' } else { 'E' });

        Ok(format!("{lat_dms}, {lon_dms}"))
    }
}

fn split_pair<'a>(
    input: &'a str,
    expected_format: &'static str,
) -> Result<(&'a str, &'a str), FormatError> {
    let parts: Vec<&str> = input.split(',').collect();
    match parts.as_slice() {
        [first, second] => Ok((first, second)),
        _ => Err(FormatError::PartCount {
            expected_format,
            input: input.to_string(),
        }),
    }
}

fn parse_dms_axis(axis: &str) -> Result<f64, FormatError> {
    let invalid = || FormatError::InvalidDmsAxis {
        axis: axis.to_string(),
    };
    let caps = DMS_AXIS.captures(axis).ok_or_else(invalid)?;

    let degrees: f64 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: f64 = caps[2].parse().map_err(|_| invalid())?;
    let seconds: f64 = caps[3].parse().map_err(|_| invalid())?;

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    match caps[4].to_ascii_uppercase().as_str() {
        "S" | "W" => Ok(-value),
        _ => Ok(value),
    }
}

fn parse_decimal(part: &str, input: &str) -> Result<f64, FormatError> {
    part.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormatError::NonNumeric {
            input: input.to_string(),
        })
}

fn format_dms_axis(value: f64, direction: char) -> String {
    let magnitude = value.abs();
    let degrees = magnitude.floor();
    let minutes_decimal = (magnitude - degrees) * 60.0;
    let minutes = minutes_decimal.floor();
    let seconds = (minutes_decimal - minutes) * 60.0;

    let seconds = to_fixed(seconds, SECOND_PLACES);
    format!("{degrees}°{minutes}'{seconds}\"{direction}")
}

/// Fixed-point rendering that rounds exact halves away from zero.
///
/// `format!("{:.N}")` rounds an exact half to even (`0.125` -> `0.12`),
/// shared coordinates are expected to round it up (`0.13`).
fn to_fixed(value: f64, places: usize) -> String {
    let extended = format!("{:.*}", places + TIE_CHECK_DIGITS, value.abs());
    let (head, tail) = extended.split_at(extended.len() - TIE_CHECK_DIGITS);
    let is_exact_half = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if !is_exact_half {
        return format!("{value:.places$}");
    }

    let mut digits: Vec<u8> = head.trim_end_matches('.').bytes().collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => continue,
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", String::from_utf8_lossy(&digits))
}
