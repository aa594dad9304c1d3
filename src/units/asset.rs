//! Token quantities: divisible (8 implied decimals) or indivisible.
//!
//! Divisibility comes from asset metadata and is always supplied by the
//! caller. It is never guessed from the number: `"5"` is 5 × 10^8 base units
//! of a divisible asset but 5 base units of an indivisible one.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::NumericInput;
use crate::units::convert::{floor_to_units, AmountError, BTC_DECIMALS, SATS_PER_BTC};

/// Whether an asset supports fractional quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Divisibility {
    /// 8 fractional digits, stored like satoshis
    Divisible,
    /// Whole units only
    Indivisible,
}

impl Divisibility {
    /// Map the `divisible` flag found in asset metadata.
    pub fn from_flag(divisible: bool) -> Self {
        if divisible {
            Divisibility::Divisible
        } else {
            Divisibility::Indivisible
        }
    }

    /// Base units per whole displayed unit
    pub fn units_per_whole(self) -> u64 {
        match self {
            Divisibility::Divisible => SATS_PER_BTC,
            Divisibility::Indivisible => 1,
        }
    }

    fn decimals(self) -> u32 {
        match self {
            Divisibility::Divisible => BTC_DECIMALS,
            Divisibility::Indivisible => 0,
        }
    }
}

/// A token quantity held as an integer count of base units.
///
/// ## Example
///
/// ```
/// use wallet_numerics::units::{AssetQuantity, Divisibility};
///
/// let divisible = AssetQuantity::from_display("1.5", Divisibility::Divisible);
/// assert_eq!(divisible.base_units(), 150_000_000);
/// assert_eq!(divisible.to_string(), "1.50000000");
///
/// let indivisible = AssetQuantity::from_display("7.9", Divisibility::Indivisible);
/// assert_eq!(indivisible.base_units(), 7);
/// assert_eq!(indivisible.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetQuantity {
    units: u64,
    divisibility: Divisibility,
}

impl AssetQuantity {
    pub fn from_base_units(units: u64, divisibility: Divisibility) -> Self {
        Self {
            units,
            divisibility,
        }
    }

    /// Convert a displayed quantity, flooring anything below one base unit.
    pub fn try_from_display<'a>(
        quantity: impl Into<NumericInput<'a>>,
        divisibility: Divisibility,
    ) -> Result<Self, AmountError> {
        let units = floor_to_units(quantity, divisibility.units_per_whole())?;
        Ok(Self::from_base_units(units, divisibility))
    }

    /// Like [`AssetQuantity::try_from_display`], with unconvertible input
    /// collapsing to zero.
    pub fn from_display<'a>(
        quantity: impl Into<NumericInput<'a>>,
        divisibility: Divisibility,
    ) -> Self {
        Self::try_from_display(quantity, divisibility).unwrap_or_else(|err| {
            tracing::debug!(error = %err, ?divisibility, "asset quantity not convertible, using zero");
            Self::from_base_units(0, divisibility)
        })
    }

    pub fn base_units(&self) -> u64 {
        self.units
    }

    pub fn divisibility(&self) -> Divisibility {
        self.divisibility
    }

    /// Exact displayed quantity
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.units), self.divisibility.decimals())
    }

    /// 8 fractional digits for divisible assets, a plain integer otherwise.
    pub fn to_display(&self) -> String {
        match self.divisibility {
            Divisibility::Divisible => format!("{:.8}", self.to_decimal()),
            Divisibility::Indivisible => self.units.to_string(),
        }
    }
}

impl fmt::Display for AssetQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}
