//! Fee validation outcomes.
//!
//! The `Display` text of [`FeeError`] is the message forms show next to the
//! offending field; [`FeeWarning`] text is advisory only.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::DecimalValue;
use crate::units::from_satoshis;

/// Why a fee check failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeeError {
    #[error("Fee rate is required")]
    RateRequired,

    #[error("Fee rate cannot be zero")]
    RateZero,

    #[error("Fee rate must be a valid number")]
    RateNotANumber,

    #[error("Fee rate cannot be negative")]
    RateNegative,

    #[error("Fee rate too low (minimum {min} sat/vB)")]
    RateTooLow { min: Decimal },

    #[error("Fee rate too high (maximum {max} sat/vB)")]
    RateTooHigh { max: Decimal },

    #[error("Estimated fee exceeds the representable range")]
    FeeOverflow,

    #[error("Invalid amount, fee, or balance")]
    InvalidAmounts,

    #[error("Insufficient balance: short by {shortfall}")]
    InsufficientBalance { shortfall: Decimal },

    #[error("Transaction sizes must be greater than zero")]
    InvalidTransactionSize,

    #[error("Parent transaction already has sufficient fee rate")]
    ParentFeeSufficient,

    #[error("Required fee rate too high: {rate} sat/vB")]
    CpfpRateTooHigh { rate: DecimalValue },

    #[error("Unknown fee priority: {0}")]
    UnknownPriority(String),
}

impl FeeError {
    /// Stable rule name for logs (message text may carry amounts)
    pub fn rule(&self) -> &'static str {
        match self {
            FeeError::RateRequired => "rate_required",
            FeeError::RateZero => "rate_zero",
            FeeError::RateNotANumber => "rate_not_a_number",
            FeeError::RateNegative => "rate_negative",
            FeeError::RateTooLow { .. } => "rate_too_low",
            FeeError::RateTooHigh { .. } => "rate_too_high",
            FeeError::FeeOverflow => "fee_overflow",
            FeeError::InvalidAmounts => "invalid_amounts",
            FeeError::InsufficientBalance { .. } => "insufficient_balance",
            FeeError::InvalidTransactionSize => "invalid_transaction_size",
            FeeError::ParentFeeSufficient => "parent_fee_sufficient",
            FeeError::CpfpRateTooHigh { .. } => "cpfp_rate_too_high",
            FeeError::UnknownPriority(_) => "unknown_priority",
        }
    }
}

/// Advisory notes attached to a successful check.
#[derive(Debug, Clone, PartialEq)]
pub enum FeeWarning {
    /// Rate above the high-fee threshold
    HighFeeRate { rate: Decimal, threshold: Decimal },
    /// Absolute fee above the high-fee threshold (satoshis)
    HighFee { fee: u64, threshold: u64 },
}

impl std::fmt::Display for FeeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeWarning::HighFeeRate { rate, threshold } => write!(
                f,
                "Fee rate of {rate} sat/vB is above {threshold} sat/vB and may be excessive"
            ),
            FeeWarning::HighFee { fee, threshold } => write!(
                f,
                "High fee: {fee} satoshis ({} BTC) exceeds {threshold} satoshis",
                from_satoshis(*fee)
            ),
        }
    }
}

impl FeeWarning {
    /// Stable warning name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            FeeWarning::HighFeeRate { .. } => "high_fee_rate",
            FeeWarning::HighFee { .. } => "high_fee",
        }
    }
}

/// Fee configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid fee config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("fee config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid fee config: {0}")]
    Invalid(String),
}
