//! Conversion between BTC amounts and satoshis.
//!
//! ## Flooring
//!
//! BTC → satoshi conversion multiplies by 10^8 and floors. It never rounds
//! up, so `0.000000015` BTC (1.5 satoshis) becomes 1 satoshi. As a result
//! `from_satoshis(to_satoshis(x))` is within one satoshi (1e-8) of `x`.
//!
//! ## Precision
//!
//! Scaling multiplies the decimal's integer mantissa and divides by its
//! power of ten, so no step rounds. The result is stored in a `u64`; every
//! amount up to 21,000,000 × 10^8 satoshis (and well beyond) converts
//! exactly.
//!
//! ## Examples
//!
//! ```
//! use wallet_numerics::units::{from_satoshis, to_satoshis, Satoshis};
//!
//! assert_eq!(to_satoshis("0.00000001"), Satoshis::new(1));
//! assert_eq!(to_satoshis("21000000").to_string(), "2100000000000000");
//! assert_eq!(from_satoshis(1u64), "0.00000001");
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::{try_parse, NumericInput, ParseError};
use crate::units::Satoshis;

/// Satoshis per BTC: 10^8
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Fractional digits of a BTC amount
pub const BTC_DECIMALS: u32 = 8;

/// Largest satoshi count an `f64` holds exactly: 2^53 - 1.
///
/// [`from_satoshis_as_number`] converts amounts up to this bound without
/// losing whole satoshis. That is about 90,071,992 BTC, above the 21,000,000
/// coin supply.
pub const MAX_EXACT_FLOAT_SATS: u64 = (1 << 53) - 1;

/// Why an amount could not be converted to base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount could not be parsed: {0}")]
    Unparseable(#[from] ParseError),

    #[error("amount cannot be negative")]
    Negative,

    #[error("amount must be a finite number")]
    NonFinite,

    #[error("amount exceeds the representable range")]
    OutOfRange,
}

// ============================================================================
// BTC -> Satoshis
// ============================================================================

/// Convert a BTC amount to satoshis, flooring fractional satoshis.
///
/// Any amount that cannot be converted (missing, unparseable, negative,
/// non-finite, out of range) becomes zero satoshis. Use
/// [`try_to_satoshis`] to see why.
pub fn to_satoshis<'a>(btc: impl Into<NumericInput<'a>>) -> Satoshis {
    try_to_satoshis(btc).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "BTC amount not convertible, using zero satoshis");
        Satoshis::ZERO
    })
}

/// Convert a BTC amount to satoshis, reporting why conversion failed.
///
/// # Example
///
/// ```
/// use wallet_numerics::units::{try_to_satoshis, AmountError, Satoshis};
///
/// assert_eq!(try_to_satoshis("0.000000015"), Ok(Satoshis::new(1)));
/// assert_eq!(try_to_satoshis("-1"), Err(AmountError::Negative));
/// ```
pub fn try_to_satoshis<'a>(btc: impl Into<NumericInput<'a>>) -> Result<Satoshis, AmountError> {
    floor_to_units(btc, SATS_PER_BTC).map(Satoshis::new)
}

/// Parse `input`, scale it by `units_per_whole` and floor to an integer.
pub(crate) fn floor_to_units<'a>(
    input: impl Into<NumericInput<'a>>,
    units_per_whole: u64,
) -> Result<u64, AmountError> {
    let amount = try_parse(input)?
        .as_decimal()
        .ok_or(AmountError::NonFinite)?;
    decimal_to_units(amount, units_per_whole)
}

/// Scale a decimal by `units_per_whole` and floor to an integer.
pub(crate) fn decimal_to_units(amount: Decimal, units_per_whole: u64) -> Result<u64, AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative);
    }

    // Integer math on the mantissa: Decimal multiplication rounds once the
    // product outgrows 96 bits
    let scaled = amount
        .mantissa()
        .unsigned_abs()
        .checked_mul(u128::from(units_per_whole))
        .ok_or(AmountError::OutOfRange)?;
    let units = scaled / 10u128.pow(amount.scale());
    u64::try_from(units).map_err(|_| AmountError::OutOfRange)
}

// ============================================================================
// Satoshis -> BTC
// ============================================================================

/// Exact BTC value of a satoshi amount
pub fn satoshis_to_decimal(sats: impl Into<Satoshis>) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(sats.into().as_u64()), BTC_DECIMALS)
}

/// Format a satoshi amount as BTC with exactly 8 fractional digits.
///
/// # Example
///
/// ```
/// use wallet_numerics::units::from_satoshis;
///
/// assert_eq!(from_satoshis(0u64), "0.00000000");
/// assert_eq!(from_satoshis(150_000_000u64), "1.50000000");
/// ```
pub fn from_satoshis(sats: impl Into<Satoshis>) -> String {
    format!("{:.8}", satoshis_to_decimal(sats))
}

/// Convert a satoshi amount to BTC as an `f64`.
///
/// Only exact for inputs up to [`MAX_EXACT_FLOAT_SATS`]; above that the
/// integer itself is rounded before division. Even below it the result is
/// the nearest `f64` to the BTC value, not the value itself, so use
/// [`from_satoshis`] or [`satoshis_to_decimal`] for anything that feeds
/// further arithmetic.
pub fn from_satoshis_as_number(sats: impl Into<Satoshis>) -> f64 {
    sats.into().as_u64() as f64 / SATS_PER_BTC as f64
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{parse, DecimalValue};
    use rust_decimal_macros::dec;

    #[test]
    fn test_constants() {
        assert_eq!(SATS_PER_BTC, 10u64.pow(BTC_DECIMALS));
        assert_eq!(MAX_EXACT_FLOAT_SATS, 9_007_199_254_740_991);
        assert!(Satoshis::MAX_MONEY.as_u64() < MAX_EXACT_FLOAT_SATS);
    }

    #[test]
    fn test_to_satoshis_wallet_inputs() {
        assert_eq!(to_satoshis("0.015"), Satoshis::new(1_500_000));
        assert_eq!(to_satoshis(" 1,234.5 "), Satoshis::new(123_450_000_000));
        assert_eq!(to_satoshis("1e-8"), Satoshis::new(1));
        assert_eq!(to_satoshis(0.1), Satoshis::new(10_000_000));
        assert_eq!(to_satoshis(dec!(0.00000546)), Satoshis::new(546));
    }

    #[test]
    fn test_to_satoshis_floors() {
        assert_eq!(to_satoshis("0.000000015"), Satoshis::new(1));
        assert_eq!(to_satoshis("0.000000019999"), Satoshis::new(1));
        assert_eq!(to_satoshis("0.000000009"), Satoshis::ZERO);
    }

    #[test]
    fn test_to_satoshis_floors_past_mantissa_precision() {
        // More significant digits than the decimal can hold
        assert_eq!(
            to_satoshis("12345678.999999999999999999999999"),
            Satoshis::new(1_234_567_899_999_999)
        );
        assert_eq!(
            to_satoshis("20999999.9999999999999999999999999999"),
            Satoshis::new(2_099_999_999_999_999)
        );
        assert_eq!(
            to_satoshis(format!("0.{}", "9".repeat(40)).as_str()),
            Satoshis::new(99_999_999)
        );
    }

    #[test]
    fn test_to_satoshis_total_supply() {
        assert_eq!(to_satoshis("21000000"), Satoshis::MAX_MONEY);
        assert_eq!(to_satoshis("21,000,000").to_string(), "2100000000000000");
        assert_eq!(to_satoshis("20999999.99999999"), Satoshis::new(2_099_999_999_999_999));
        assert_eq!(to_satoshis("20999999.999999999"), Satoshis::new(2_099_999_999_999_999));
    }

    #[test]
    fn test_to_satoshis_collapses_to_zero() {
        for input in ["", "-0", "abc", "=SUM(1,1)", "-1.0", "Infinity", "NaN"] {
            assert_eq!(to_satoshis(input), Satoshis::ZERO, "input {input:?}");
        }
        assert_eq!(to_satoshis(None::<&str>), Satoshis::ZERO);
    }

    #[test]
    fn test_try_to_satoshis_errors() {
        assert_eq!(try_to_satoshis("-1.0"), Err(AmountError::Negative));
        assert_eq!(try_to_satoshis("Infinity"), Err(AmountError::NonFinite));
        assert_eq!(try_to_satoshis(""), Err(AmountError::Unparseable(ParseError::Empty)));
        assert_eq!(
            try_to_satoshis("1000000000000000000"),
            Err(AmountError::OutOfRange)
        );
    }

    #[test]
    fn test_decimal_to_units_largest_values() {
        assert_eq!(decimal_to_units(Decimal::MAX, 1), Err(AmountError::OutOfRange));
        assert_eq!(
            decimal_to_units(dec!(184467440737.09551615), SATS_PER_BTC),
            Ok(u64::MAX)
        );
        assert_eq!(decimal_to_units(Decimal::MAX, u64::MAX), Err(AmountError::OutOfRange));
    }

    #[test]
    fn test_from_satoshis_formatting() {
        assert_eq!(from_satoshis(0u64), "0.00000000");
        assert_eq!(from_satoshis(1u64), "0.00000001");
        assert_eq!(from_satoshis(546u64), "0.00000546");
        assert_eq!(from_satoshis(Satoshis::MAX_MONEY), "21000000.00000000");
        assert_eq!(from_satoshis(u64::MAX), "184467440737.09551615");
    }

    #[test]
    fn test_from_satoshis_as_number() {
        assert_eq!(from_satoshis_as_number(150_000_000u64), 1.5);
        assert_eq!(from_satoshis_as_number(0u64), 0.0);
        assert_eq!(from_satoshis_as_number(Satoshis::MAX_MONEY), 21_000_000.0);
    }

    #[test]
    fn test_satoshis_to_decimal() {
        assert_eq!(satoshis_to_decimal(123_456_789u64), dec!(1.23456789));
    }

    #[test]
    fn test_supply_boundary_survives_display() {
        for sats in [1u64, 99_999_999, 2_099_999_999_999_999, Satoshis::MAX_MONEY.as_u64()] {
            assert_eq!(to_satoshis(from_satoshis(sats).as_str()), Satoshis::new(sats));
        }
    }

    #[test]
    fn test_roundtrip_within_one_satoshi() {
        for input in ["0.123456789", "1.999999999", "0.000000015"] {
            let original = parse(input);
            let back = parse(from_satoshis(to_satoshis(input)).as_str());
            assert!(back <= original, "input {input:?}");
            assert!(original - back < DecimalValue::finite(dec!(0.00000001)), "input {input:?}");
        }
    }
}
