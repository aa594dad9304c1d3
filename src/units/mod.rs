//! Conversion between human decimal units and integer base units.
//!
//! ## Types
//!
//! - [`Satoshis`]: whole satoshis, 1 satoshi = 10^-8 BTC
//! - [`AssetQuantity`]: token quantity in base units
//! - [`Divisibility`]: divisible (8 decimals) or indivisible token
//!
//! ## Fixed-Point Representation
//!
//! Base units are `u64` counts scaled by 10^8 (or 1 for indivisible
//! assets). Example: 50000.12345678 BTC is stored as 5_000_012_345_678.

mod asset;
mod convert;
mod satoshis;

pub use asset::{AssetQuantity, Divisibility};
pub use convert::{
    from_satoshis, from_satoshis_as_number, satoshis_to_decimal, to_satoshis, try_to_satoshis,
    AmountError, BTC_DECIMALS, MAX_EXACT_FLOAT_SATS, SATS_PER_BTC,
};
pub use satoshis::{
    is_equal_to, is_greater_than, is_greater_than_or_equal_to, is_less_than,
    is_less_than_or_equal_to, Satoshis,
};
