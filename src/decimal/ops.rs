//! Arithmetic over raw inputs.
//!
//! Every function parses its arguments with [`parse`] (so garbage becomes
//! zero) and returns a [`DecimalValue`]. Nothing here panics: division by
//! zero and overflow produce non-finite values that callers can test with
//! [`DecimalValue::is_finite`].

use crate::decimal::{parse, DecimalValue, NumericInput};

/// `a + b`
pub fn add<'a>(a: impl Into<NumericInput<'a>>, b: impl Into<NumericInput<'a>>) -> DecimalValue {
    parse(a) + parse(b)
}

/// `a - b`
pub fn subtract<'a>(
    a: impl Into<NumericInput<'a>>,
    b: impl Into<NumericInput<'a>>,
) -> DecimalValue {
    parse(a) - parse(b)
}

/// `a × b`
pub fn multiply<'a>(
    a: impl Into<NumericInput<'a>>,
    b: impl Into<NumericInput<'a>>,
) -> DecimalValue {
    parse(a) * parse(b)
}

/// `a ÷ b`
///
/// # Example
///
/// ```
/// use wallet_numerics::decimal::divide;
///
/// assert!(!divide("1", "0").is_finite());
/// assert!(divide("0", "0").is_nan());
/// ```
pub fn divide<'a>(
    a: impl Into<NumericInput<'a>>,
    b: impl Into<NumericInput<'a>>,
) -> DecimalValue {
    parse(a) / parse(b)
}

/// Ceiling to the nearest integer. Non-finite values pass through.
pub fn round_up<'a>(value: impl Into<NumericInput<'a>>) -> DecimalValue {
    ceil(parse(value))
}

/// Floor to the nearest integer. Non-finite values pass through.
pub fn round_down<'a>(value: impl Into<NumericInput<'a>>) -> DecimalValue {
    floor(parse(value))
}

/// Floor `value` to the nearest multiple of `multiple` at or below it.
///
/// The sign of `multiple` is ignored, so the result is always `<= value`.
/// A zero multiple yields a non-finite result.
///
/// # Example
///
/// ```
/// use wallet_numerics::decimal::round_down_to_multiple;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_down_to_multiple("1234", "100"), Decimal::from(1200));
/// assert_eq!(round_down_to_multiple("-5", "2"), Decimal::from(-6));
/// ```
pub fn round_down_to_multiple<'a>(
    value: impl Into<NumericInput<'a>>,
    multiple: impl Into<NumericInput<'a>>,
) -> DecimalValue {
    let value = parse(value);
    let multiple = parse(multiple).abs();

    // The exact remainder keeps the result at or below `value` even when
    // the quotient has more digits than the decimal can hold
    if let (DecimalValue::Finite(v), DecimalValue::Finite(m)) = (value, multiple) {
        let aligned = v
            .checked_rem(m)
            .and_then(|r| r.checked_add(m))
            .and_then(|r| r.checked_rem(m))
            .and_then(|offset| v.checked_sub(offset));
        if let Some(aligned) = aligned {
            return DecimalValue::finite(aligned);
        }
    }

    floor(value / multiple) * multiple
}

fn ceil(value: DecimalValue) -> DecimalValue {
    match value {
        DecimalValue::Finite(d) => DecimalValue::finite(d.ceil()),
        other => other,
    }
}

fn floor(value: DecimalValue) -> DecimalValue {
    match value {
        DecimalValue::Finite(d) => DecimalValue::finite(d.floor()),
        other => other,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
