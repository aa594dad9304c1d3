//! The satoshi amount type and its ordering helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::units::{convert, AmountError, SATS_PER_BTC};

/// A non-negative whole number of satoshis.
///
/// Always integral: converters floor fractional satoshis away, so an amount
/// never overstates available funds.
///
/// ## Example
///
/// ```
/// use wallet_numerics::units::Satoshis;
///
/// let balance: Satoshis = "2100000000000000".parse().unwrap();
/// assert_eq!(balance, Satoshis::MAX_MONEY);
/// assert_eq!(balance.to_string(), "2100000000000000");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Satoshis(u64);

impl Satoshis {
    pub const ZERO: Satoshis = Satoshis(0);

    /// Total coin supply: 21,000,000 × 10^8 satoshis
    pub const MAX_MONEY: Satoshis = Satoshis(21_000_000 * SATS_PER_BTC);

    pub const fn new(sats: u64) -> Self {
        Self(sats)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Satoshis) -> Option<Satoshis> {
        self.0.checked_add(rhs.0).map(Satoshis)
    }

    pub fn checked_sub(self, rhs: Satoshis) -> Option<Satoshis> {
        self.0.checked_sub(rhs.0).map(Satoshis)
    }

    pub fn saturating_sub(self, rhs: Satoshis) -> Satoshis {
        Satoshis(self.0.saturating_sub(rhs.0))
    }
}

impl From<u64> for Satoshis {
    fn from(sats: u64) -> Self {
        Self(sats)
    }
}

impl From<Satoshis> for u64 {
    fn from(sats: Satoshis) -> Self {
        sats.0
    }
}

impl fmt::Display for Satoshis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parses a satoshi count (not a BTC amount). Fractions are floored.
impl FromStr for Satoshis {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        convert::floor_to_units(s, 1).map(Satoshis)
    }
}

// ============================================================================
// Comparison Helpers
// ============================================================================

/// `a < b` in satoshis
pub fn is_less_than(a: impl Into<Satoshis>, b: impl Into<Satoshis>) -> bool {
    a.into() < b.into()
}

/// `a <= b` in satoshis
pub fn is_less_than_or_equal_to(a: impl Into<Satoshis>, b: impl Into<Satoshis>) -> bool {
    a.into() <= b.into()
}

/// `a > b` in satoshis
pub fn is_greater_than(a: impl Into<Satoshis>, b: impl Into<Satoshis>) -> bool {
    a.into() > b.into()
}

/// `a >= b` in satoshis
pub fn is_greater_than_or_equal_to(a: impl Into<Satoshis>, b: impl Into<Satoshis>) -> bool {
    a.into() >= b.into()
}

/// `a == b` in satoshis
pub fn is_equal_to(a: impl Into<Satoshis>, b: impl Into<Satoshis>) -> bool {
    a.into() == b.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_money() {
        assert_eq!(Satoshis::MAX_MONEY.as_u64(), 2_100_000_000_000_000);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("546".parse::<Satoshis>(), Ok(Satoshis::new(546)));
        assert_eq!("1,000".parse::<Satoshis>(), Ok(Satoshis::new(1000)));
        assert_eq!("10.9".parse::<Satoshis>(), Ok(Satoshis::new(10)));
        assert_eq!("-1".parse::<Satoshis>(), Err(AmountError::Negative));
        assert!("abc".parse::<Satoshis>().is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Satoshis::new(10);
        let b = Satoshis::new(3);

        assert_eq!(a.checked_add(b), Some(Satoshis::new(13)));
        assert_eq!(a.checked_sub(b), Some(Satoshis::new(7)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(b.saturating_sub(a), Satoshis::ZERO);
        assert_eq!(Satoshis::new(u64::MAX).checked_add(Satoshis::new(1)), None);
    }

    #[test]
    fn test_comparisons() {
        assert!(is_less_than(1u64, 2u64));
        assert!(!is_less_than(2u64, 2u64));
        assert!(is_less_than_or_equal_to(2u64, 2u64));
        assert!(!is_less_than_or_equal_to(3u64, 2u64));
        assert!(is_greater_than(Satoshis::MAX_MONEY, 0u64));
        assert!(is_greater_than_or_equal_to(0u64, 0u64));
        assert!(is_equal_to(Satoshis::new(5), 5u64));
    }

    #[test]
    fn test_serde_transparent() {
        let text = toml::to_string(&Wrapper { sats: Satoshis::new(42) }).unwrap();
        assert_eq!(text.trim(), "sats = 42");
    }

    #[derive(Serialize)]
    struct Wrapper {
        sats: Satoshis,
    }
}
