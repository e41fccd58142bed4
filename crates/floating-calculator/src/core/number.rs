//! Display text <-> number conversion
//!
//! The display buffer is plain text, so every operator press re-reads it.
//! Reading takes the longest numeric prefix (`"1.2.3"` reads as `1.2`) and
//! anything unreadable becomes `NaN`. Writing uses the shortest round-trip
//! digits, positional between `1e-6` and `1e21`, exponential outside, and
//! spells the non-finite values `NaN`, `Infinity` and `-Infinity`.

/// Text used for positive infinity
pub const INFINITY_TEXT: &str = "Infinity";

/// Text used for NaN
pub const NAN_TEXT: &str = "NaN";

/// Reads the longest numeric prefix of `text`
///
/// Leading whitespace is skipped. The prefix is an optionally signed decimal
/// literal with at least one mantissa digit and an optional exponent, or the
/// word `Infinity`. Returns `NaN` when no prefix qualifies.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    if s[i..].starts_with(INFINITY_TEXT) {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return f64::NAN;
    }

    let mut exponent = "0";
    if i < len && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let digits_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            exponent = &s[i + 1..j];
        }
    }

    let literal = format!(
        "{}.{}e{}",
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent
    );
    let magnitude = literal.parse::<f64>().unwrap_or(f64::NAN);

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Formats a number the way the display shows it
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return NAN_TEXT.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            INFINITY_TEXT.to_string()
        } else {
            format!("-{INFINITY_TEXT}")
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, point) = shortest_digits(value.abs());
    let k = digits.len() as i32;

    let body = if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let exp = point - 1;
        let exp_sign = if exp >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{}", exp.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{}", exp.abs())
        }
    };

    format!("{sign}{body}")
}

/// Shortest round-trip decimal digits of a positive finite value, with the
/// position of the decimal point relative to the first digit
fn shortest_digits(value: f64) -> (String, i32) {
    // LowerExp prints the shortest digits that round-trip: "1.2345e3"
    let formatted = format!("{value:e}");
    let (mantissa, exponent) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    (digits, exponent + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== parse_number =====

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("0"), 0.0);
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_number("3.5"), 3.5);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number(".25"), 0.25);
        assert_eq!(parse_number("0."), 0.0);
    }

    #[test]
    fn test_parse_takes_longest_prefix() {
        assert_eq!(parse_number("1.2.3"), 1.2);
        assert_eq!(parse_number("12abc"), 12.0);
        assert_eq!(parse_number("7e"), 7.0);
        assert_eq!(parse_number("7e+"), 7.0);
    }

    #[test]
    fn test_parse_signs_and_whitespace() {
        assert_eq!(parse_number("-8"), -8.0);
        assert_eq!(parse_number("+8"), 8.0);
        assert_eq!(parse_number("  9"), 9.0);
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_number("1e+21"), 1e21);
        assert_eq!(parse_number("2.5e-7"), 2.5e-7);
        assert_eq!(parse_number("3E2"), 300.0);
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_garbage_is_nan() {
        assert!(parse_number("").is_nan());
        assert!(parse_number("-").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("Infinit").is_nan());
        assert!(parse_number("inf").is_nan());
    }

    // ===== format_number =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(1000000.0), "1000000");
    }

    #[test]
    fn test_format_zero_has_no_sign() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666666666666");
    }

    #[test]
    fn test_format_small_values() {
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-1.5e-9), "-1.5e-9");
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.25e30), "1.25e+30");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_round_trips(value in proptest::num::f64::NORMAL) {
            prop_assert_eq!(parse_number(&format_number(value)), value);
        }

        #[test]
        fn prop_parse_never_panics(text in "\\PC{0,16}") {
            let _ = parse_number(&text);
        }
    }
}
