//! Conversions between human-readable token amounts and base units.
//!
//! Amounts never pass through floating point: input strings are validated
//! here and handed to alloy's unit parser, and display strings come from
//! alloy's unit formatter.

use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::U256;
use stata_contracts::TOKEN_DECIMALS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Enter an amount")]
    Empty,
    #[error("Amount must be a plain decimal number")]
    Malformed,
    #[error("At most {max} decimal places are allowed")]
    TooPrecise { max: u8 },
    #[error("Amount is too large")]
    Overflow,
}

/// Parse a decimal string such as `"12.5"` into base units (6 decimals).
pub fn parse_amount(input: &str) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Malformed);
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(AmountError::Malformed);
    }
    if frac_part.len() > TOKEN_DECIMALS as usize {
        return Err(AmountError::TooPrecise { max: TOKEN_DECIMALS });
    }

    // Anything under 10^77 base units fits in a U256.
    if int_part.trim_start_matches('0').len() + TOKEN_DECIMALS as usize > 77 {
        return Err(AmountError::Overflow);
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let canonical = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    };

    let parsed = parse_units(&canonical, TOKEN_DECIMALS).map_err(|_| AmountError::Overflow)?;
    Ok(parsed.get_absolute())
}

/// Fixed-width display: always six fractional digits (`"0.000000"`).
pub fn format_fixed(value: U256) -> String {
    // Unit 6 is always valid, so the fallback is unreachable in practice.
    format_units(value, TOKEN_DECIMALS).unwrap_or_else(|_| value.to_string())
}

/// Shortest display: trailing fractional zeros and a bare point are dropped
/// (`12500000` becomes `"12.5"`, `1000000` becomes `"1"`).
pub fn format_amount(value: U256) -> String {
    let fixed = format_fixed(value);
    match fixed.split_once('.') {
        Some((int_part, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int_part.to_string()
            } else {
                format!("{int_part}.{frac}")
            }
        }
        None => fixed,
    }
}

/// Shorten a hex string to `0x1234...abcd` for compact display.
pub fn truncate_hex(hex: &str) -> String {
    if hex.len() > 12 {
        format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
    } else {
        hex.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_amount() {
        assert_eq!(parse_amount("12.5"), Ok(U256::from(12_500_000u64)));
        assert_eq!(parse_amount("0.000001"), Ok(U256::from(1u64)));
        assert_eq!(parse_amount("7"), Ok(U256::from(7_000_000u64)));
        assert_eq!(parse_amount(" 3.25 "), Ok(U256::from(3_250_000u64)));
    }

    #[test]
    fn accepts_leading_or_trailing_point() {
        assert_eq!(parse_amount(".5"), Ok(U256::from(500_000u64)));
        assert_eq!(parse_amount("5."), Ok(U256::from(5_000_000u64)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_amount("   "), Err(AmountError::Empty));
        assert_eq!(parse_amount("."), Err(AmountError::Malformed));
        assert_eq!(parse_amount("abc"), Err(AmountError::Malformed));
        assert_eq!(parse_amount("1.2.3"), Err(AmountError::Malformed));
        assert_eq!(parse_amount("-1"), Err(AmountError::Malformed));
        assert_eq!(parse_amount("1e6"), Err(AmountError::Malformed));
        assert_eq!(parse_amount("1,5"), Err(AmountError::Malformed));
    }

    #[test]
    fn rejects_more_than_six_decimals() {
        assert_eq!(parse_amount("0.0000001"), Err(AmountError::TooPrecise { max: 6 }));
    }

    #[test]
    fn rejects_values_beyond_u256() {
        let huge = "9".repeat(90);
        assert_eq!(parse_amount(&huge), Err(AmountError::Overflow));
    }

    #[test]
    fn fixed_format_pads_to_six_places() {
        assert_eq!(format_fixed(U256::ZERO), "0.000000");
        assert_eq!(format_fixed(U256::from(12_500_000u64)), "12.500000");
        assert_eq!(format_fixed(U256::from(1u64)), "0.000001");
    }

    #[test]
    fn canonical_strings_survive_parse_and_format() {
        for s in ["0", "1", "12.5", "0.000001", "123456.654321", "1000000", "0.1"] {
            let parsed = parse_amount(s).unwrap();
            assert_eq!(format_amount(parsed), s, "round trip of {s}");
        }
    }

    #[test]
    fn unlimited_allowance_formats_without_panicking() {
        let formatted = format_fixed(U256::MAX);
        assert!(formatted.ends_with(".639935"));
    }

    #[test]
    fn truncates_long_hex() {
        assert_eq!(
            truncate_hex("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            "0x8335...2913"
        );
        assert_eq!(truncate_hex("0x1234"), "0x1234");
    }
}
