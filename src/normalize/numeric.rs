// src/normalize/numeric.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static NON_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("digit filter should compile"));

/// Parse a Brazilian-locale quantity like `"1.234.567"` into an integer.
///
/// `.` is a thousands separator and `,` a decimal separator (truncated when
/// present); the literal `"-"` means zero. Malformed text degrades to 0 and
/// is logged, never propagated.
pub fn parse_quantity(text: &str) -> i64 {
    let text = text.trim();
    if text == "-" || text.is_empty() {
        return 0;
    }
    let cleaned = text.replace('.', "").replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(v) => v as i64,
        Err(_) => {
            warn!(cell = %text, "unparseable quantity, defaulting to 0");
            0
        }
    }
}

/// Parse a Brazilian-locale currency amount like `"15.000,00"` into a float.
/// Same degradation policy as [`parse_quantity`].
pub fn parse_value(text: &str) -> f64 {
    let text = text.trim();
    if text == "-" || text.is_empty() {
        return 0.0;
    }
    let cleaned = text.replace('.', "").replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn!(cell = %text, "unparseable value, defaulting to 0.0");
            0.0
        }
    }
}

/// Quantity fallback used by the commercialization report, whose cells mix
/// stray footnote characters into the numbers: keep the digits, drop the
/// rest. No digits at all means zero.
pub fn strip_non_digits(text: &str) -> i64 {
    let digits = NON_DIGIT.replace_all(text.trim(), "");
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<i64>().unwrap_or_else(|_| {
        warn!(cell = %text, "digit-only quantity overflowed, defaulting to 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_is_zero() {
        assert_eq!(parse_quantity("-"), 0);
        assert_eq!(parse_value("-"), 0.0);
    }

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(parse_quantity("1.000.000"), 1_000_000);
        assert_eq!(parse_quantity("195.031.611"), 195_031_611);
    }

    #[test]
    fn comma_decimal_is_truncated_for_quantities() {
        assert_eq!(parse_quantity("1.234,56"), 1234);
    }

    #[test]
    fn value_parses_comma_decimal() {
        assert_eq!(parse_value("15.000,00"), 15000.0);
        assert_eq!(parse_value("2.608.162,00"), 2_608_162.0);
    }

    #[test]
    fn malformed_text_degrades_to_zero() {
        assert_eq!(parse_quantity("n/d"), 0);
        assert_eq!(parse_quantity("12a34"), 0);
        assert_eq!(parse_value("sem dados"), 0.0);
        assert_eq!(parse_quantity(""), 0);
    }

    #[test]
    fn digit_stripping_keeps_only_digits() {
        assert_eq!(strip_non_digits("1.234.567"), 1_234_567);
        assert_eq!(strip_non_digits(" 98 *"), 98);
        assert_eq!(strip_non_digits("-"), 0);
        assert_eq!(strip_non_digits("sem dados"), 0);
    }
}
