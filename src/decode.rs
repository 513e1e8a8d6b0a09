//! Repeated percent-decoding for values that were encoded more than once
//! when passed around in share links (`?c=40.7128%252C-74.0060`).

use tracing::debug;

/// Percent-decode `input` until a pass changes nothing.
///
/// Stops after `max_iterations` passes. A pass that fails (invalid UTF-8
/// after decoding) ends the loop with the last successfully decoded value.
#[must_use]
pub fn decode_until_stable(input: &str, max_iterations: u32) -> String {
    let mut current = input.to_string();

    for iteration in 0..max_iterations {
        let decoded = match urlencoding::decode(&current) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                debug!("Stopping decode after {} passes: {}", iteration, e);
                return current;
            }
        };

        if decoded == current {
            return current;
        }
        current = decoded;
    }

    debug!("Decode iteration cap of {} reached", max_iterations);
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("40.7128,-74.0060", "40.7128,-74.0060")]
    #[case("40.7128%2C-74.0060", "40.7128,-74.0060")]
    #[case("40.7128%252C-74.0060", "40.7128,-74.0060")]
    #[case("40%C2%B042'46.08%22N", "40°42'46.08\"N")]
    fn test_decodes_to_fixed_point(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_until_stable(input, 10), expected);
    }

    #[test]
    fn test_iteration_cap() {
        // three levels of encoding, only two passes allowed
        assert_eq!(decode_until_stable("%25252C", 2), "%2C");
    }

    #[test]
    fn test_invalid_utf8_keeps_last_good_value() {
        assert_eq!(decode_until_stable("%25FF", 10), "%FF");
    }

    #[test]
    fn test_zero_iterations_returns_input() {
        assert_eq!(decode_until_stable("%2C", 0), "%2C");
    }
}
