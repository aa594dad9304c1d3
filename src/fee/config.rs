//! Fee-market tuning.
//!
//! Every rate and size constant the engine uses lives in [`FeeConfig`], so
//! the engine can be re-tuned for fee-market conditions without touching
//! logic. Defaults match the `pub const`s below.
//!
//! ## TOML Overrides
//!
//! ```
//! use wallet_numerics::fee::FeeConfig;
//! use rust_decimal::Decimal;
//!
//! let config = FeeConfig::from_toml_str(r#"
//!     min_fee_rate = "2"
//!     typical_input_size = 68
//! "#).unwrap();
//!
//! assert_eq!(config.min_fee_rate, Decimal::from(2));
//! assert_eq!(config.typical_input_size, 68);
//! assert_eq!(config.typical_output_size, 34);
//! ```
//!
//! Decimal fields are written as quoted strings so they stay exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fee::ConfigError;

/// Lowest accepted fee rate (sat/vB)
pub const MIN_FEE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Highest accepted fee rate (sat/vB)
pub const MAX_FEE_RATE: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Rate used for medium priority (sat/vB)
pub const DEFAULT_FEE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// High priority = default rate × 1.5
pub const PRIORITY_FEE_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// High-priority fallback when a custom rate table omits `high`
pub const CUSTOM_HIGH_FALLBACK_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Rates above this draw a warning and are not "reasonable" (sat/vB)
pub const HIGH_FEE_RATE_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Fees above this draw a warning: 0.001 BTC
pub const HIGH_FEE_WARNING_SATS: u64 = 100_000;

/// A rate up to this multiple of the network rate is "reasonable"
pub const NETWORK_RATE_TOLERANCE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Typical P2PKH input size (vbytes)
pub const TYPICAL_INPUT_SIZE: u64 = 148;

/// Typical output size (vbytes)
pub const TYPICAL_OUTPUT_SIZE: u64 = 34;

/// Version, locktime and count fields (vbytes)
pub const TRANSACTION_OVERHEAD: u64 = 10;

/// Tunable fee-engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub min_fee_rate: Decimal,
    pub max_fee_rate: Decimal,
    pub default_fee_rate: Decimal,
    pub priority_fee_multiplier: Decimal,
    pub custom_high_fallback_multiplier: Decimal,
    pub high_fee_rate_threshold: Decimal,
    pub high_fee_warning_sats: u64,
    pub network_rate_tolerance: Decimal,
    pub typical_input_size: u64,
    pub typical_output_size: u64,
    pub transaction_overhead: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            min_fee_rate: MIN_FEE_RATE,
            max_fee_rate: MAX_FEE_RATE,
            default_fee_rate: DEFAULT_FEE_RATE,
            priority_fee_multiplier: PRIORITY_FEE_MULTIPLIER,
            custom_high_fallback_multiplier: CUSTOM_HIGH_FALLBACK_MULTIPLIER,
            high_fee_rate_threshold: HIGH_FEE_RATE_THRESHOLD,
            high_fee_warning_sats: HIGH_FEE_WARNING_SATS,
            network_rate_tolerance: NETWORK_RATE_TOLERANCE,
            typical_input_size: TYPICAL_INPUT_SIZE,
            typical_output_size: TYPICAL_OUTPUT_SIZE,
            transaction_overhead: TRANSACTION_OVERHEAD,
        }
    }
}

impl FeeConfig {
    /// Parse and check a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: FeeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_fee_rate <= Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "min_fee_rate must be positive".to_string(),
            ));
        }
        if self.min_fee_rate > self.max_fee_rate {
            return Err(ConfigError::Invalid(format!(
                "min_fee_rate {} exceeds max_fee_rate {}",
                self.min_fee_rate, self.max_fee_rate
            )));
        }
        if self.default_fee_rate < self.min_fee_rate || self.default_fee_rate > self.max_fee_rate {
            return Err(ConfigError::Invalid(format!(
                "default_fee_rate {} outside [{}, {}]",
                self.default_fee_rate, self.min_fee_rate, self.max_fee_rate
            )));
        }
        Ok(())
    }

    /// Default bounds for [`FeeEngine::validate_fee_rate`](crate::fee::FeeEngine::validate_fee_rate)
    pub fn rate_bounds(&self) -> RateBounds {
        RateBounds {
            min_rate: self.min_fee_rate,
            max_rate: self.max_fee_rate,
            warn_high_fee: true,
        }
    }

    /// Default sizes for [`FeeEngine::calculate_transaction_fee`](crate::fee::FeeEngine::calculate_transaction_fee)
    pub fn size_profile(&self) -> SizeProfile {
        SizeProfile {
            input_size: self.typical_input_size,
            output_size: self.typical_output_size,
            overhead: self.transaction_overhead,
        }
    }
}

/// Per-call fee-rate limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBounds {
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    /// Attach a warning to valid but unusually high rates
    pub warn_high_fee: bool,
}

impl Default for RateBounds {
    fn default() -> Self {
        FeeConfig::default().rate_bounds()
    }
}

/// Per-call transaction size assumptions (vbytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeProfile {
    pub input_size: u64,
    pub output_size: u64,
    pub overhead: u64,
}

impl Default for SizeProfile {
    fn default() -> Self {
        FeeConfig::default().size_profile()
    }
}
