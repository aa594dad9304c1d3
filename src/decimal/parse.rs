//! Lenient, linear-time decimal parsing.
//!
//! ## Two Entry Points
//!
//! - [`try_parse`] returns a tagged `Result`, so callers (and tests) can tell
//!   "the user typed 0" apart from "the user typed garbage"
//! - [`parse`] is the public boundary: every [`ParseError`] collapses to zero
//!
//! ## Accepted Syntax
//!
//! After commas and whitespace are stripped:
//!
//! ```text
//! [+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?     at least one mantissa digit
//! [+-]? Infinity
//! ```
//!
//! Anything else (formula prefixes like `=SUM(1,1)`, repeated signs like
//! `+1+1`, hex, `NaN`) is rejected.
//!
//! ## Complexity
//!
//! Input is scanned once, byte by byte, with no backtracking. The value
//! handed to [`rust_decimal`] is an integer mantissa of at most 29
//! significant digits plus a scale, so the work after scanning is bounded no
//! matter how long the input was. Digits that do not fit are truncated,
//! never rounded.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::{DecimalValue, NumericInput};

/// Maximum fractional digits the backing decimal can hold
const MAX_SCALE: i64 = 28;

/// Integer digits beyond this cannot fit in 96 bits
const MAX_INTEGER_DIGITS: i64 = 29;

/// Decimal digits that always fit in the 96-bit mantissa, plus one
const MAX_SIGNIFICANT_DIGITS: usize = 29;

/// Largest mantissa of the backing decimal: 2^96 - 1
const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Exponents are clamped here while scanning; anything larger is already
/// far outside the representable range.
const EXPONENT_LIMIT: i64 = 1_000_000;

/// Why an input could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no numeric input provided")]
    Empty,

    #[error("input is not a number")]
    NotANumber,

    #[error("unexpected character at position {position}")]
    Malformed { position: usize },
}

/// Parse any input into a [`DecimalValue`], falling back to zero.
///
/// Missing, empty and malformed input all become zero. Callers that need to
/// know whether a value was actually provided must check the raw input
/// (see [`NumericInput::is_blank`]) or use [`try_parse`].
///
/// # Example
///
/// ```
/// use wallet_numerics::decimal::parse;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse("1, 000, 000"), Decimal::from(1_000_000));
/// assert_eq!(parse("=SUM(1,1)"), Decimal::ZERO);
/// assert_eq!(parse("-0"), Decimal::ZERO);
/// ```
pub fn parse<'a>(input: impl Into<NumericInput<'a>>) -> DecimalValue {
    match try_parse(input) {
        Ok(value) => value,
        Err(ParseError::Empty) => DecimalValue::ZERO,
        Err(err) => {
            tracing::debug!(error = %err, "unparseable numeric input, using zero");
            DecimalValue::ZERO
        }
    }
}

/// Parse any input, reporting failures instead of collapsing them.
///
/// Never returns [`DecimalValue::NaN`]: a `NaN` input is an error.
pub fn try_parse<'a>(input: impl Into<NumericInput<'a>>) -> Result<DecimalValue, ParseError> {
    match input.into() {
        NumericInput::Missing => Err(ParseError::Empty),
        NumericInput::Text(text) => parse_text(text),
        NumericInput::Float(value) => parse_float(value),
        NumericInput::Exact(value) => Ok(DecimalValue::finite(value)),
        NumericInput::Value(DecimalValue::NaN) => Err(ParseError::NotANumber),
        NumericInput::Value(value) => Ok(value),
    }
}

fn parse_float(value: f64) -> Result<DecimalValue, ParseError> {
    if value.is_nan() {
        Err(ParseError::NotANumber)
    } else if value.is_infinite() {
        Ok(DecimalValue::infinity(value.is_sign_negative()))
    } else {
        // Display for f64 is the shortest text that round-trips, so 0.1
        // becomes exactly 0.1 rather than its binary approximation
        parse_text(&value.to_string())
    }
}

fn parse_text(raw: &str) -> Result<DecimalValue, ParseError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.as_str() {
        "" => Err(ParseError::Empty),
        "Infinity" | "+Infinity" => Ok(DecimalValue::PositiveInfinity),
        "-Infinity" => Ok(DecimalValue::NegativeInfinity),
        "NaN" | "+NaN" | "-NaN" => Err(ParseError::NotANumber),
        text => Lexeme::scan(text)?.into_value(),
    }
}

/// The pieces of a syntactically valid number, borrowed from the input.
#[derive(Debug, PartialEq)]
struct Lexeme<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

impl<'a> Lexeme<'a> {
    fn scan(text: &'a str) -> Result<Self, ParseError> {
        let bytes = text.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let start = pos;
        pos = skip_digits(bytes, pos);
        let integer = &text[start..pos];

        let mut fraction = "";
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            let start = pos;
            pos = skip_digits(bytes, pos);
            fraction = &text[start..pos];
        }

        if integer.is_empty() && fraction.is_empty() {
            return Err(ParseError::Malformed { position: pos });
        }

        let mut exponent = 0i64;
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            pos += 1;
            let exponent_negative = match bytes.get(pos) {
                Some(b'-') => {
                    pos += 1;
                    true
                }
                Some(b'+') => {
                    pos += 1;
                    false
                }
                _ => false,
            };

            let start = pos;
            while let Some(digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                exponent = (exponent * 10 + i64::from(digit - b'0')).min(EXPONENT_LIMIT);
                pos += 1;
            }
            if pos == start {
                return Err(ParseError::Malformed { position: pos });
            }
            if exponent_negative {
                exponent = -exponent;
            }
        }

        if pos != bytes.len() {
            return Err(ParseError::Malformed { position: pos });
        }

        Ok(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    /// Value = significant digits × 10^(exponent - fraction length).
    ///
    /// Digits the 96-bit mantissa cannot hold are fractional and are
    /// truncated toward zero, never rounded.
    fn into_value(self) -> Result<DecimalValue, ParseError> {
        let integer = self.integer.trim_start_matches('0');
        let fraction = self.fraction.trim_end_matches('0');

        let mut digits = String::with_capacity(integer.len() + fraction.len());
        digits.push_str(integer);
        digits.push_str(fraction);

        let mut significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(DecimalValue::ZERO);
        }

        let mut scale = fraction.len() as i64 - self.exponent;
        if significant.len() as i64 - scale > MAX_INTEGER_DIGITS {
            return Ok(DecimalValue::infinity(self.negative));
        }

        // Digits below 10^-28 are dropped
        if scale > MAX_SCALE {
            let excess = (scale - MAX_SCALE) as usize;
            if excess >= significant.len() {
                return Ok(DecimalValue::ZERO);
            }
            significant = &significant[..significant.len() - excess];
            scale = MAX_SCALE;
        }

        // At most 29 integer digits remain, so only fractional digits are cut
        let kept = significant.len().min(MAX_SIGNIFICANT_DIGITS);
        scale -= (significant.len() - kept) as i64;
        let mut mantissa = mantissa_of(&significant[..kept]);
        if mantissa > MAX_MANTISSA {
            if scale <= 0 {
                return Ok(DecimalValue::infinity(self.negative));
            }
            mantissa /= 10;
            scale -= 1;
        }

        if scale < 0 {
            let widened = 10u128
                .checked_pow(scale.unsigned_abs() as u32)
                .and_then(|factor| mantissa.checked_mul(factor))
                .filter(|widened| *widened <= MAX_MANTISSA);
            let Some(widened) = widened else {
                return Ok(DecimalValue::infinity(self.negative));
            };
            mantissa = widened;
            scale = 0;
        }

        // mantissa <= 2^96 - 1, so the cast is lossless
        let signed = if self.negative {
            -(mantissa as i128)
        } else {
            mantissa as i128
        };
        match Decimal::try_from_i128_with_scale(signed, scale as u32) {
            Ok(value) => Ok(DecimalValue::finite(value)),
            Err(_) => Ok(DecimalValue::infinity(self.negative)),
        }
    }
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// Integer value of an ASCII digit run of at most 29 digits.
fn mantissa_of(digits: &str) -> u128 {
    digits
        .bytes()
        .fold(0u128, |acc, digit| acc * 10 + u128::from(digit - b'0'))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse("123.456"), dec!(123.456));
        assert_eq!(parse("-42"), dec!(-42));
        assert_eq!(parse("+7"), dec!(7));
        assert_eq!(parse(".5"), dec!(0.5));
        assert_eq!(parse("5."), dec!(5));
        assert_eq!(parse("0.00000001"), dec!(0.00000001));
    }

    #[test]
    fn test_parse_strips_separators_and_whitespace() {
        assert_eq!(parse("1, 000, 000"), dec!(1000000));
        assert_eq!(parse(" 123.456 "), dec!(123.456));
        assert_eq!(parse("1 234.5"), dec!(1234.5));
        assert_eq!(parse("\t21,000,000\n"), dec!(21000000));
    }

    #[test]
    fn test_parse_missing_and_empty() {
        assert_eq!(parse(None::<&str>), DecimalValue::ZERO);
        assert_eq!(parse(""), DecimalValue::ZERO);
        assert_eq!(parse("   "), DecimalValue::ZERO);
        assert_eq!(try_parse(""), Err(ParseError::Empty));
        assert_eq!(try_parse(None::<f64>), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_malformed_falls_back_to_zero() {
        for input in ["+1+1", "-1-1", "=SUM(1,1)", "@NOW()", "abc", "1.2.3", "0x10", "1e", "-", "."] {
            assert_eq!(parse(input), DecimalValue::ZERO, "input {input:?}");
            assert!(
                matches!(try_parse(input), Err(ParseError::Malformed { .. })),
                "input {input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_malformed_position() {
        assert_eq!(try_parse("+1+1"), Err(ParseError::Malformed { position: 2 }));
        assert_eq!(try_parse("=SUM(1,1)"), Err(ParseError::Malformed { position: 0 }));
    }

    #[test]
    fn test_parse_nan() {
        assert_eq!(try_parse("NaN"), Err(ParseError::NotANumber));
        assert_eq!(try_parse(f64::NAN), Err(ParseError::NotANumber));
        assert_eq!(parse("NaN"), DecimalValue::ZERO);
        assert_eq!(parse(f64::NAN), DecimalValue::ZERO);
        assert_eq!(try_parse(DecimalValue::NaN), Err(ParseError::NotANumber));
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse("Infinity"), DecimalValue::PositiveInfinity);
        assert_eq!(parse("-Infinity"), DecimalValue::NegativeInfinity);
        assert_eq!(parse(f64::INFINITY), DecimalValue::PositiveInfinity);
        assert_eq!(parse(f64::NEG_INFINITY), DecimalValue::NegativeInfinity);
    }

    #[test]
    fn test_negative_zero() {
        for input in ["-0", "-0.0", "-0e5", "-.000"] {
            let value = parse(input);
            assert!(value.is_zero(), "input {input:?}");
            assert!(!value.is_negative(), "input {input:?}");
        }
        assert!(!parse(-0.0).is_negative());
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse("1e-8"), dec!(0.00000001));
        assert_eq!(parse("2.5E3"), dec!(2500));
        assert_eq!(parse("-1.5e+2"), dec!(-150));
        assert_eq!(parse("1e-40"), DecimalValue::ZERO);
    }

    #[test]
    fn test_parse_floats_exactly() {
        assert_eq!(parse(0.1), dec!(0.1));
        assert_eq!(parse(21_000_000.0), dec!(21000000));
        assert_eq!(parse(1e-7), dec!(0.0000001));
    }

    #[test]
    fn test_parse_preserves_eight_decimals() {
        assert_eq!(parse("20999999.99999999"), dec!(20999999.99999999));
        assert_eq!(parse("0.12345678"), dec!(0.12345678));
    }

    #[test]
    fn test_unbounded_magnitudes() {
        let huge = "9".repeat(1000);
        assert_eq!(parse(huge.as_str()), DecimalValue::PositiveInfinity);
        assert_eq!(parse(format!("-{huge}").as_str()), DecimalValue::NegativeInfinity);
        assert_eq!(parse("1e400"), DecimalValue::PositiveInfinity);
        assert_eq!(parse(1e300), DecimalValue::PositiveInfinity);
    }

    #[test]
    fn test_leading_zeros_do_not_count_toward_range() {
        let padded = format!("{}1", "0".repeat(1000));
        assert_eq!(parse(padded.as_str()), dec!(1));
    }

    #[test]
    fn test_excess_fraction_truncates() {
        let long = format!("0.{}", "1".repeat(60));
        let value = parse(long.as_str());
        assert!(value.is_finite());
        assert!(value > DecimalValue::finite(dec!(0.1111111111)));
        assert!(value < DecimalValue::finite(dec!(0.1111111112)));
    }

    #[test]
    fn test_excess_significant_digits_truncate() {
        // 32 significant digits; the mantissa keeps 29
        let value = parse("12345678.999999999999999999999999");
        assert_eq!(
            value,
            Decimal::from_i128_with_scale(12_345_678_999_999_999_999_999_999_999, 21)
        );
        assert!(value < DecimalValue::finite(dec!(12345679)));

        let negative = parse("-0.99999999999999999999999999999999");
        assert!(negative > DecimalValue::finite(dec!(-1)));
    }

    #[test]
    fn test_mantissa_boundary() {
        assert_eq!(parse("79228162514264337593543950335"), Decimal::MAX);
        assert_eq!(parse("79228162514264337593543950335.99"), Decimal::MAX);
        assert_eq!(
            parse("79228162514264337593543950336"),
            DecimalValue::PositiveInfinity
        );
        assert_eq!(parse("-7.9228162514264337593543950336e28"), DecimalValue::NegativeInfinity);
        assert_eq!(parse("7.9228162514264337593543950335e28"), Decimal::MAX);
    }

    #[test]
    fn test_mantissa_of() {
        assert_eq!(mantissa_of("0042"), 42);
        assert_eq!(mantissa_of("79228162514264337593543950335"), MAX_MANTISSA);
    }

    #[test]
    fn test_lexeme_scan() {
        let lexeme = Lexeme::scan("-12.50e3").unwrap();
        assert_eq!(
            lexeme,
            Lexeme {
                negative: true,
                integer: "12",
                fraction: "50",
                exponent: 3,
            }
        );
    }
}
