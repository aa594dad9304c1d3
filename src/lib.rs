//! # Wallet Numerics
//!
//! Numeric safety and fee-computation core for a Bitcoin/token wallet.
//!
//! ## Architecture
//!
//! Four layers, leaves first:
//! - **Decimal**: lenient parsing and arithmetic over exact decimals
//! - **Units**: BTC ↔ satoshi and token quantity ↔ base unit conversion
//! - **Telemetry**: order-of-magnitude amount buckets
//! - **Fee**: fee-rate validation, size/fee estimation, balance checks,
//!   priority rates and CPFP solving
//!
//! ## Design Principles
//!
//! 1. **No Floating Point**: all money math uses exact base-10 decimals
//! 2. **Never Overstate Funds**: BTC → satoshi conversion floors
//! 3. **Never Under-Pay**: fees round up
//! 4. **No Panics on Bad Input**: garbage parses to zero, checks return `Result`
//! 5. **Pure Functions**: no I/O, no shared state, safe to call from anywhere
//!
//! ## Example
//!
//! ```
//! use wallet_numerics::fee::{FeeEngine, SizeProfile};
//! use wallet_numerics::units::to_satoshis;
//!
//! let engine = FeeEngine::default();
//!
//! let amount = to_satoshis("0.015");
//! let preview = engine
//!     .calculate_transaction_fee(1, 2, 10u64, &SizeProfile::default())
//!     .unwrap();
//! let total = engine
//!     .validate_fee_with_balance(amount.as_u64(), preview.value.fee, "2000000")
//!     .unwrap();
//!
//! assert_eq!(total.value.to_string(), "1502260");
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Decimal parsing and arithmetic
pub mod decimal;

/// BTC, satoshi and token quantity conversion
pub mod units;

/// Privacy-preserving amount buckets
pub mod telemetry;

/// Fee validation and estimation
pub mod fee;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use decimal::{parse, try_parse, DecimalValue, NumericInput, ParseError};
pub use fee::{FeeConfig, FeeEngine, FeeError, FeeWarning, Priority};
pub use units::{from_satoshis, to_satoshis, AssetQuantity, Divisibility, Satoshis};
