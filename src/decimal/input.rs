//! Raw numeric input as it arrives from forms, APIs and callers.
//!
//! Form fields hand over text, the blockchain API hands over decimal strings,
//! internal callers hand over numbers, and optional fields may be absent.
//! [`NumericInput`] captures all of these so every operation can accept
//! `impl Into<NumericInput>`.

use rust_decimal::Decimal;

use crate::decimal::DecimalValue;

/// A value that may be turned into a [`DecimalValue`].
///
/// ## Example
///
/// ```
/// use wallet_numerics::decimal::{parse, NumericInput};
///
/// assert_eq!(parse("1,000"), parse(1000u64));
/// assert_eq!(parse(None::<&str>), parse(""));
/// assert!(NumericInput::from("  ").is_blank());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericInput<'a> {
    /// No value supplied (`None`)
    Missing,
    /// User or API text, parsed leniently
    Text(&'a str),
    /// Native floating-point number
    Float(f64),
    /// Already-exact decimal
    Exact(Decimal),
    /// Previously parsed value
    Value(DecimalValue),
}

impl NumericInput<'_> {
    /// True when nothing was provided: missing, or text that is empty
    /// after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            NumericInput::Missing => true,
            NumericInput::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for NumericInput<'a> {
    fn from(text: &'a str) -> Self {
        NumericInput::Text(text)
    }
}

impl<'a> From<&'a String> for NumericInput<'a> {
    fn from(text: &'a String) -> Self {
        NumericInput::Text(text.as_str())
    }
}

impl From<f64> for NumericInput<'_> {
    fn from(value: f64) -> Self {
        NumericInput::Float(value)
    }
}

impl From<Decimal> for NumericInput<'_> {
    fn from(value: Decimal) -> Self {
        NumericInput::Exact(value)
    }
}

impl From<DecimalValue> for NumericInput<'_> {
    fn from(value: DecimalValue) -> Self {
        NumericInput::Value(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NumericInput<'_> {
                fn from(value: $ty) -> Self {
                    NumericInput::Exact(Decimal::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<'a, T> From<Option<T>> for NumericInput<'a>
where
    T: Into<NumericInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(NumericInput::Missing, Into::into)
    }
}
