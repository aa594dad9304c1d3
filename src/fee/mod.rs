//! Fee engine module.
//!
//! ## Operations
//!
//! All operations are pure validation/computation steps over a [`FeeConfig`]:
//!
//! - [`FeeEngine::validate_fee_rate`]: range-check a user-entered rate
//! - [`FeeEngine::calculate_transaction_fee`]: size and fee preview
//! - [`FeeEngine::validate_fee_with_balance`]: amount + fee vs. balance
//!   ([`FeeEngine::try_validate_fee_with_balance`] for strict input)
//! - [`FeeEngine::estimate_fee_rate`]: priority-based rate suggestion
//! - [`FeeEngine::validate_cpfp_fee`]: Child-Pays-For-Parent rate solving
//! - [`FeeEngine::is_reasonable_fee_rate`]: sanity check against the market
//!
//! ## Units
//!
//! Rates are satoshis per virtual byte (sat/vB); sizes are virtual bytes;
//! fees are satoshis.
//!
//! ## Example
//!
//! ```
//! use wallet_numerics::fee::{FeeEngine, RateBounds};
//!
//! let engine = FeeEngine::default();
//!
//! let err = engine.validate_fee_rate("0", &RateBounds::default()).unwrap_err();
//! assert_eq!(err.to_string(), "Fee rate cannot be zero");
//!
//! let cpfp = engine.validate_cpfp_fee("20", "5", 200, 200).unwrap();
//! assert_eq!(cpfp.value.to_string(), "35");
//! ```

pub mod config;
mod engine;
mod error;

pub use config::{
    FeeConfig, RateBounds, SizeProfile, DEFAULT_FEE_RATE, MAX_FEE_RATE, MIN_FEE_RATE,
    PRIORITY_FEE_MULTIPLIER, TRANSACTION_OVERHEAD, TYPICAL_INPUT_SIZE, TYPICAL_OUTPUT_SIZE,
};
pub use engine::{CustomRates, FeeEngine, FeeEstimate, Priority, Validated, ValidationResult};
pub use error::{ConfigError, FeeError, FeeWarning};
