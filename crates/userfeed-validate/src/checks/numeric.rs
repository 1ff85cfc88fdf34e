//! Numeric parsing for coordinates.

/// Parse a base-10 floating point literal into an `f32`.
///
/// Returns `None` for anything that is not a float literal, including the
/// empty string, and for finite literals too large for `f32` (they would
/// otherwise saturate to infinity). Explicit `inf`/`infinity` and `NaN`
/// spellings are accepted as written.
pub fn parse_float32(value: &str) -> Option<f32> {
    let parsed = value.parse::<f32>().ok()?;
    if parsed.is_infinite() && !is_infinity_literal(value) {
        return None;
    }
    Some(parsed)
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_float32("10.5"), Some(10.5));
        assert_eq!(parse_float32("-77.0428"), Some(-77.0428));
        assert_eq!(parse_float32("+1e3"), Some(1000.0));
        assert_eq!(parse_float32(".5"), Some(0.5));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_float32(""), None);
        assert_eq!(parse_float32("abc"), None);
        assert_eq!(parse_float32(" 1.5"), None);
        assert_eq!(parse_float32("1,5"), None);
        assert_eq!(parse_float32("0x1p4"), None);
    }

    #[test]
    fn rejects_overflow_but_keeps_explicit_infinity() {
        assert_eq!(parse_float32("1e39"), None);
        assert_eq!(parse_float32("-1e39"), None);
        assert_eq!(parse_float32("inf"), Some(f32::INFINITY));
        assert_eq!(parse_float32("-Infinity"), Some(f32::NEG_INFINITY));
    }
}
