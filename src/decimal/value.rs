//! The decimal value type every monetary quantity passes through.
//!
//! ## Representation
//!
//! Finite values are backed by [`rust_decimal::Decimal`]: a 96-bit mantissa
//! with up to 28 fractional digits and exact base-10 semantics. The range is
//! roughly ±7.9 × 10^28, far beyond 21,000,000 × 10^8 satoshis.
//!
//! Non-finite values exist so arithmetic never panics:
//!
//! - Division of a non-zero value by zero gives a signed infinity
//! - Overflow of the backing range saturates to a signed infinity
//! - `0 / 0`, `∞ - ∞` and `0 × ∞` give [`DecimalValue::NaN`]
//!
//! The parser never produces `NaN`; only arithmetic does.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use rust_decimal::Decimal;

/// Arbitrary-precision signed decimal with explicit non-finite states.
///
/// ## Example
///
/// ```
/// use wallet_numerics::decimal::{parse, DecimalValue};
///
/// let fee = parse("0.00012");
/// assert!(fee.is_finite());
///
/// let blown = parse("1") / parse("0");
/// assert_eq!(blown, DecimalValue::PositiveInfinity);
/// assert!(!blown.is_finite());
/// ```
#[derive(Debug, Clone, Copy)]
pub enum DecimalValue {
    /// An exact base-10 value
    Finite(Decimal),
    /// Unbounded positive value
    PositiveInfinity,
    /// Unbounded negative value
    NegativeInfinity,
    /// Result of an undefined operation such as `0 / 0`
    NaN,
}

impl DecimalValue {
    /// The neutral value unparseable input collapses to.
    pub const ZERO: DecimalValue = DecimalValue::Finite(Decimal::ZERO);

    /// Wrap a decimal, normalizing negative zero to positive zero.
    pub fn finite(value: Decimal) -> Self {
        if value.is_zero() {
            Self::ZERO
        } else {
            Self::Finite(value)
        }
    }

    /// Signed infinity
    pub fn infinity(negative: bool) -> Self {
        if negative {
            Self::NegativeInfinity
        } else {
            Self::PositiveInfinity
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NaN)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::PositiveInfinity | Self::NegativeInfinity)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Finite(d) if d.is_zero())
    }

    /// Strictly below zero (negative infinity included).
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Finite(d) => d.is_sign_negative() && !d.is_zero(),
            Self::NegativeInfinity => true,
            _ => false,
        }
    }

    /// Strictly above zero (positive infinity included).
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Finite(d) => d.is_sign_positive() && !d.is_zero(),
            Self::PositiveInfinity => true,
            _ => false,
        }
    }

    /// The backing decimal, if finite.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Finite(d) => Some(*d),
            _ => None,
        }
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        match self {
            Self::Finite(d) => Self::finite(d.abs()),
            Self::NegativeInfinity => Self::PositiveInfinity,
            other => other,
        }
    }
}

impl Default for DecimalValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for DecimalValue {
    fn from(value: Decimal) -> Self {
        Self::finite(value)
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => fmt::Display::fmt(d, f),
            Self::PositiveInfinity => f.write_str("Infinity"),
            Self::NegativeInfinity => f.write_str("-Infinity"),
            Self::NaN => f.write_str("NaN"),
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl PartialEq for DecimalValue {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialEq<Decimal> for DecimalValue {
    fn eq(&self, other: &Decimal) -> bool {
        matches!(self, Self::Finite(d) if d == other)
    }
}

impl PartialOrd for DecimalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use DecimalValue::*;

        match (self, other) {
            (NaN, _) | (_, NaN) => None,
            (Finite(a), Finite(b)) => Some(a.cmp(b)),
            (PositiveInfinity, PositiveInfinity) | (NegativeInfinity, NegativeInfinity) => {
                Some(Ordering::Equal)
            }
            (PositiveInfinity, _) | (_, NegativeInfinity) => Some(Ordering::Greater),
            (NegativeInfinity, _) | (_, PositiveInfinity) => Some(Ordering::Less),
        }
    }
}

// ============================================================================
// Arithmetic (never panics; overflow saturates to infinity)
// ============================================================================

impl Neg for DecimalValue {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Finite(d) => Self::finite(-d),
            Self::PositiveInfinity => Self::NegativeInfinity,
            Self::NegativeInfinity => Self::PositiveInfinity,
            Self::NaN => Self::NaN,
        }
    }
}

impl Add for DecimalValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        use DecimalValue::*;

        match (self, rhs) {
            (NaN, _) | (_, NaN) => NaN,
            (PositiveInfinity, NegativeInfinity) | (NegativeInfinity, PositiveInfinity) => NaN,
            (PositiveInfinity, _) | (_, PositiveInfinity) => PositiveInfinity,
            (NegativeInfinity, _) | (_, NegativeInfinity) => NegativeInfinity,
            // Overflow only happens when both operands share a sign
            (Finite(a), Finite(b)) => a
                .checked_add(b)
                .map(Self::finite)
                .unwrap_or_else(|| Self::infinity(a.is_sign_negative())),
        }
    }
}

impl Sub for DecimalValue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for DecimalValue {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        use DecimalValue::*;

        match (self, rhs) {
            (NaN, _) | (_, NaN) => NaN,
            (Finite(a), Finite(b)) => a
                .checked_mul(b)
                .map(Self::finite)
                .unwrap_or_else(|| Self::infinity(a.is_sign_negative() != b.is_sign_negative())),
            (a, b) if a.is_zero() || b.is_zero() => NaN,
            (a, b) => Self::infinity(a.is_negative() != b.is_negative()),
        }
    }
}

impl Div for DecimalValue {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        use DecimalValue::*;

        match (self, rhs) {
            (NaN, _) | (_, NaN) => NaN,
            (Finite(a), Finite(b)) if b.is_zero() => {
                if a.is_zero() {
                    NaN
                } else {
                    Self::infinity(a.is_sign_negative())
                }
            }
            (Finite(a), Finite(b)) => a
                .checked_div(b)
                .map(Self::finite)
                .unwrap_or_else(|| Self::infinity(a.is_sign_negative() != b.is_sign_negative())),
            (Finite(_), _) => Self::ZERO,
            (a, Finite(b)) => Self::infinity(a.is_negative() != b.is_sign_negative()),
            _ => NaN,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
