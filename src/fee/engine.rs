//! Stateless fee validation and estimation.
//!
//! Every operation is a pure function of its arguments and the engine's
//! [`FeeConfig`]; the engine can be shared freely across threads and forms.
//! Results are `Result<Validated<T>, FeeError>`: the error side carries the
//! user-facing message, the success side carries the derived value plus an
//! optional non-blocking [`FeeWarning`].

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{parse, try_parse, DecimalValue, NumericInput, ParseError};
use crate::fee::{FeeConfig, FeeError, FeeWarning, RateBounds, SizeProfile};

/// Outcome of a fee check: either a validated value or the reason it failed.
pub type ValidationResult<T> = Result<Validated<T>, FeeError>;

/// A value that passed validation, possibly with an advisory warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub value: T,
    pub warning: Option<FeeWarning>,
}

impl<T> Validated<T> {
    fn new(value: T, warning: Option<FeeWarning>) -> Self {
        if let Some(warning) = &warning {
            tracing::warn!(kind = warning.kind(), "fee check passed with warning");
        }
        Self { value, warning }
    }
}

/// Confirmation urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(FeeError::UnknownPriority(other.to_string())),
        }
    }
}

/// Caller-supplied rate table, e.g. from a fee-estimation service (sat/vB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomRates {
    pub low: Option<Decimal>,
    pub medium: Option<Decimal>,
    pub high: Option<Decimal>,
}

/// Size and fee preview for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEstimate {
    /// Virtual bytes
    pub estimated_size: u64,
    /// Satoshis, always rounded up
    pub fee: u64,
}

/// Fee validation and estimation over a fixed [`FeeConfig`].
///
/// ## Example
///
/// ```
/// use wallet_numerics::fee::{FeeEngine, SizeProfile};
///
/// let engine = FeeEngine::default();
///
/// let rate = engine.validate_fee_rate("12.5", &engine.config().rate_bounds()).unwrap();
/// let preview = engine
///     .calculate_transaction_fee(2, 2, rate.value, &SizeProfile::default())
///     .unwrap();
///
/// assert_eq!(preview.value.estimated_size, 374);
/// assert_eq!(preview.value.fee, 4675);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeeEngine {
    config: FeeConfig,
}

impl FeeEngine {
    pub fn new(config: FeeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeeConfig {
        &self.config
    }

    /// Check a user-entered fee rate against `bounds`.
    ///
    /// Checks run in this order, first failure wins:
    ///
    /// 1. blank input (missing, empty or whitespace-only): "Fee rate is required"
    /// 2. parses to zero, including unparseable input: "cannot be zero"
    /// 3. non-finite: "must be a valid number"
    /// 4. negative, below minimum, above maximum
    ///
    /// Returns the rate; rates above the high-fee threshold carry a warning
    /// when `bounds.warn_high_fee` is set.
    pub fn validate_fee_rate<'a>(
        &self,
        rate: impl Into<NumericInput<'a>>,
        bounds: &RateBounds,
    ) -> ValidationResult<Decimal> {
        let input = rate.into();
        if input.is_blank() {
            return rejected(FeeError::RateRequired);
        }

        let rate = parse(input);
        if rate.is_zero() {
            return rejected(FeeError::RateZero);
        }
        let Some(rate) = rate.as_decimal() else {
            return rejected(FeeError::RateNotANumber);
        };

        if rate.is_sign_negative() {
            return rejected(FeeError::RateNegative);
        }
        if rate < bounds.min_rate {
            return rejected(FeeError::RateTooLow {
                min: bounds.min_rate,
            });
        }
        if rate > bounds.max_rate {
            return rejected(FeeError::RateTooHigh {
                max: bounds.max_rate,
            });
        }

        let threshold = self.config.high_fee_rate_threshold;
        let warning = (bounds.warn_high_fee && rate > threshold)
            .then_some(FeeWarning::HighFeeRate { rate, threshold });
        Ok(Validated::new(rate, warning))
    }

    /// Estimate size and fee: `size = inputs·input_size + outputs·output_size
    /// + overhead`, `fee = ceil(size · rate)`.
    ///
    /// The fee is always rounded up so the wallet never under-pays.
    pub fn calculate_transaction_fee<'a>(
        &self,
        inputs: u64,
        outputs: u64,
        fee_rate: impl Into<NumericInput<'a>>,
        sizes: &SizeProfile,
    ) -> ValidationResult<FeeEstimate> {
        let Some(rate) = parse(fee_rate).as_decimal() else {
            return rejected(FeeError::RateNotANumber);
        };
        if rate.is_sign_negative() && !rate.is_zero() {
            return rejected(FeeError::RateNegative);
        }

        let estimated_size = inputs
            .checked_mul(sizes.input_size)
            .zip(outputs.checked_mul(sizes.output_size))
            .and_then(|(ins, outs)| ins.checked_add(outs))
            .and_then(|size| size.checked_add(sizes.overhead));
        let Some(estimated_size) = estimated_size else {
            return rejected(FeeError::FeeOverflow);
        };

        let fee = Decimal::from(estimated_size)
            .checked_mul(rate)
            .and_then(|fee| fee.ceil().to_u64());
        let Some(fee) = fee else {
            return rejected(FeeError::FeeOverflow);
        };

        let threshold = self.config.high_fee_warning_sats;
        let warning = (fee > threshold).then_some(FeeWarning::HighFee { fee, threshold });
        Ok(Validated::new(
            FeeEstimate {
                estimated_size,
                fee,
            },
            warning,
        ))
    }

    /// Check that `amount + fee` fits in `balance`; returns the total.
    ///
    /// Inputs go through [`parse`], so missing or garbage values count as
    /// zero. Only `NaN` and infinite values are rejected. Use
    /// [`FeeEngine::try_validate_fee_with_balance`] to reject anything that
    /// is not a non-negative number.
    pub fn validate_fee_with_balance<'a>(
        &self,
        amount: impl Into<NumericInput<'a>>,
        fee: impl Into<NumericInput<'a>>,
        balance: impl Into<NumericInput<'a>>,
    ) -> ValidationResult<Decimal> {
        let (Some(amount), Some(fee), Some(balance)) =
            (finite_amount(amount), finite_amount(fee), finite_amount(balance))
        else {
            return rejected(FeeError::InvalidAmounts);
        };
        check_balance(amount, fee, balance)
    }

    /// Like [`FeeEngine::validate_fee_with_balance`], but missing,
    /// unparseable and negative inputs are rejected too.
    pub fn try_validate_fee_with_balance<'a>(
        &self,
        amount: impl Into<NumericInput<'a>>,
        fee: impl Into<NumericInput<'a>>,
        balance: impl Into<NumericInput<'a>>,
    ) -> ValidationResult<Decimal> {
        let (Some(amount), Some(fee), Some(balance)) =
            (strict_amount(amount), strict_amount(fee), strict_amount(balance))
        else {
            return rejected(FeeError::InvalidAmounts);
        };
        check_balance(amount, fee, balance)
    }

    /// Suggested rate for `priority` (sat/vB).
    ///
    /// Without a rate table: low = minimum, medium = default,
    /// high = default × `priority_fee_multiplier` (1.5).
    ///
    /// With a table, present entries are used verbatim. Missing low/medium
    /// fall back as above, but a missing high falls back to
    /// default × `custom_high_fallback_multiplier` (2).
    pub fn estimate_fee_rate(&self, priority: Priority, custom: Option<&CustomRates>) -> Decimal {
        let config = &self.config;
        let default = config.default_fee_rate;

        match (priority, custom) {
            (Priority::Low, None) => config.min_fee_rate,
            (Priority::Medium, None) => default,
            (Priority::High, None) => default.saturating_mul(config.priority_fee_multiplier),
            (Priority::Low, Some(rates)) => rates.low.unwrap_or(config.min_fee_rate),
            (Priority::Medium, Some(rates)) => rates.medium.unwrap_or(default),
            (Priority::High, Some(rates)) => rates
                .high
                .unwrap_or_else(|| default.saturating_mul(config.custom_high_fallback_multiplier)),
        }
    }

    /// Solve the child rate needed for Child-Pays-For-Parent.
    ///
    /// `target_rate` is the desired combined rate of parent and child.
    /// The child must pay `target_rate · (child_size + parent_size)` minus
    /// what the parent already paid; the returned value is that fee divided
    /// by `child_size`.
    pub fn validate_cpfp_fee<'a>(
        &self,
        target_rate: impl Into<NumericInput<'a>>,
        parent_rate: impl Into<NumericInput<'a>>,
        child_size: u64,
        parent_size: u64,
    ) -> ValidationResult<Decimal> {
        let target_rate = parse(target_rate);
        let parent_rate = parse(parent_rate);
        if !target_rate.is_finite() || !parent_rate.is_finite() {
            return rejected(FeeError::RateNotANumber);
        }
        if child_size == 0 || parent_size == 0 {
            return rejected(FeeError::InvalidTransactionSize);
        }
        if parent_rate >= target_rate {
            return rejected(FeeError::ParentFeeSufficient);
        }

        let child = DecimalValue::from(Decimal::from(child_size));
        let parent = DecimalValue::from(Decimal::from(parent_size));

        let parent_fee = parent_rate * parent;
        let required_total_fee = target_rate * (child + parent);
        let required_child_fee = required_total_fee - parent_fee;
        if !required_child_fee.is_positive() {
            return rejected(FeeError::ParentFeeSufficient);
        }

        let effective_rate = match required_child_fee / child {
            DecimalValue::Finite(rate) => DecimalValue::finite(rate.normalize()),
            other => other,
        };
        if effective_rate > DecimalValue::from(self.config.max_fee_rate) {
            return rejected(FeeError::CpfpRateTooHigh {
                rate: effective_rate,
            });
        }
        match effective_rate.as_decimal() {
            Some(rate) => Ok(Validated::new(rate, None)),
            None => rejected(FeeError::FeeOverflow),
        }
    }

    /// Sanity check a rate: at least the minimum and at most the high-fee
    /// threshold, or `network_rate × network_rate_tolerance` when a network
    /// reference rate is known.
    pub fn is_reasonable_fee_rate<'a>(
        &self,
        rate: impl Into<NumericInput<'a>>,
        network_rate: Option<Decimal>,
    ) -> bool {
        let Some(rate) = parse(rate).as_decimal() else {
            return false;
        };

        let ceiling = match network_rate {
            Some(network) => network.saturating_mul(self.config.network_rate_tolerance),
            None => self.config.high_fee_rate_threshold,
        };
        rate >= self.config.min_fee_rate && rate <= ceiling
    }
}

fn rejected<T>(error: FeeError) -> ValidationResult<T> {
    tracing::debug!(rule = error.rule(), "fee check rejected");
    Err(error)
}

fn check_balance(amount: Decimal, fee: Decimal, balance: Decimal) -> ValidationResult<Decimal> {
    let Some(total_required) = amount.checked_add(fee) else {
        return rejected(FeeError::InvalidAmounts);
    };
    if total_required > balance {
        return rejected(FeeError::InsufficientBalance {
            shortfall: total_required - balance,
        });
    }
    Ok(Validated::new(total_required, None))
}

/// Parsed value with garbage as zero; `None` for `NaN` and infinities.
fn finite_amount<'a>(input: impl Into<NumericInput<'a>>) -> Option<Decimal> {
    match try_parse(input) {
        Ok(value) => value.as_decimal(),
        Err(ParseError::NotANumber) => None,
        Err(_) => Some(Decimal::ZERO),
    }
}

fn strict_amount<'a>(input: impl Into<NumericInput<'a>>) -> Option<Decimal> {
    try_parse(input)
        .ok()
        .and_then(|value| value.as_decimal())
        .filter(|value| !value.is_sign_negative() || value.is_zero())
}

// ============================================================================
// Unit Tests
// ============================================================================
