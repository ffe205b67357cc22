//! Forgiving number parsing for operator-entered form values.
//!
//! Empty, non-numeric and negative input all normalize to zero. Parsing reads
//! the longest numeric prefix, so `"12 checks"` is 12. A leading `$` and
//! thousands separators are accepted.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

/// Parses a decimal value, falling back to zero.
#[must_use]
pub fn parse_decimal(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let prefix = numeric_prefix(&cleaned).trim_start_matches('+');
    let candidate = if prefix.starts_with('.') {
        format!("0{prefix}")
    } else {
        prefix.to_string()
    };

    match Decimal::from_str(&candidate) {
        Ok(value) if value.is_sign_positive() => value,
        _ => Decimal::ZERO,
    }
}

/// Parses a whole count. Fractions are truncated.
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    parse_decimal(raw).trunc().to_u64().unwrap_or(0)
}

/// Formats a count with thousands separators: `12,345`.
#[must_use]
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Inserts `,` every three digits from the right.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Longest prefix shaped like `[+-]digits[.digits]`; empty if none.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if has_digits { &s[..end] } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("100", dec!(100))]
    #[case("50.5", dec!(50.5))]
    #[case("  42.10 ", dec!(42.1))]
    #[case("$1,234.56", dec!(1234.56))]
    #[case(".75", dec!(0.75))]
    #[case("12 checks", dec!(12))]
    #[case("7.", dec!(7))]
    #[case("", dec!(0))]
    #[case("abc", dec!(0))]
    #[case("-", dec!(0))]
    #[case(".", dec!(0))]
    #[case("-25", dec!(0))]
    fn test_parse_decimal(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal(raw), expected);
    }

    #[test]
    fn test_parse_decimal_overflow_is_zero() {
        assert_eq!(parse_decimal(&"9".repeat(60)), Decimal::ZERO);
    }

    #[rstest]
    #[case("10", 10)]
    #[case("10.9", 10)]
    #[case("1,500", 1500)]
    #[case("", 0)]
    #[case("n/a", 0)]
    #[case("-3", 0)]
    fn test_parse_count(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(parse_count(raw), expected);
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(1_234_567, "1,234,567")]
    fn test_format_count(#[case] count: u64, #[case] expected: &str) {
        assert_eq!(format_count(count), expected);
    }
}
