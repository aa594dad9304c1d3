//! Privacy-preserving amount classes for analytics.
//!
//! Exact wallet amounts must never leave the device. Telemetry reports the
//! order-of-magnitude bucket from [`amount_bucket`] instead.
//!
//! | Amount (coin units) | Bucket    |
//! |---------------------|-----------|
//! | `< 0.00001`         | 0         |
//! | `[0.00001, 0.001)`  | 1         |
//! | `[0.001, 0.01)`     | 100       |
//! | `[0.01, 0.1)`       | 1000      |
//! | `[0.1, 1)`          | 10000     |
//! | `[1, 10)`           | 100000    |
//! | `>= 10`             | 1000000   |

use rust_decimal::Decimal;

use crate::decimal::{parse, DecimalValue, NumericInput};

/// Bucket an amount into its order-of-magnitude class.
///
/// Unparseable input counts as zero; unbounded input lands in the top
/// bucket.
///
/// # Example
///
/// ```
/// use wallet_numerics::telemetry::amount_bucket;
///
/// assert_eq!(amount_bucket("0.000001"), 0);
/// assert_eq!(amount_bucket("0.5"), 10_000);
/// assert_eq!(amount_bucket("10"), 1_000_000);
/// ```
pub fn amount_bucket<'a>(amount: impl Into<NumericInput<'a>>) -> u64 {
    let amount = match parse(amount) {
        DecimalValue::Finite(d) => d,
        DecimalValue::PositiveInfinity => return 1_000_000,
        DecimalValue::NegativeInfinity | DecimalValue::NaN => return 0,
    };

    // Lower bounds, highest first
    let buckets = [
        (Decimal::TEN, 1_000_000),
        (Decimal::ONE, 100_000),
        (Decimal::new(1, 1), 10_000),
        (Decimal::new(1, 2), 1_000),
        (Decimal::new(1, 3), 100),
        (Decimal::new(1, 5), 1),
    ];

    buckets
        .iter()
        .find(|(floor, _)| amount >= *floor)
        .map_or(0, |(_, bucket)| *bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let cases = [
            ("0", 0),
            ("0.00000999", 0),
            ("0.00001", 1),
            ("0.00099999", 1),
            ("0.001", 100),
            ("0.00999999", 100),
            ("0.01", 1_000),
            ("0.09999999", 1_000),
            ("0.1", 10_000),
            ("0.99999999", 10_000),
            ("1", 100_000),
            ("9.99999999", 100_000),
            ("10", 1_000_000),
            ("21000000", 1_000_000),
        ];

        for (amount, expected) in cases {
            assert_eq!(amount_bucket(amount), expected, "amount {amount}");
        }
    }

    #[test]
    fn test_bucket_odd_input() {
        assert_eq!(amount_bucket("garbage"), 0);
        assert_eq!(amount_bucket("-5"), 0);
        assert_eq!(amount_bucket(None::<&str>), 0);
        assert_eq!(amount_bucket("Infinity"), 1_000_000);
        assert_eq!(amount_bucket(0.5), 10_000);
    }
}
