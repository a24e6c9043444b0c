//! # Money Module
//!
//! Provides the `Money` type for fee arithmetic.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    150 × 0.10 = 15.000000000000002                                      │
//! │                                                                         │
//! │  Fees here are multiplied by rates (0.10 per transaction, 15% off),    │
//! │  so integer pence alone would round too early.                         │
//! │                                                                         │
//! │  OUR SOLUTION: exact base-10 Decimal, rounded ONCE at the end           │
//! │    55 × 0.2 = 11 exactly → rounded to 11.00                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billing_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let fee = Money::from_decimal(dec!(25));
//! let overage = Money::from_decimal(dec!(0.10)).multiply_quantity(dec!(50)); // £5.00
//! let subtotal = fee + overage;                                       // £30.00
//! assert_eq!(subtotal.rounded().amount(), dec!(30.00));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in pounds, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: rates multiply cleanly without drift
/// - **Unrounded while computing**: `rounded()` is applied to outputs only
/// - **JSON number on the wire**: clients send and receive `25.5`, not `"25.5"`
///
/// ## Where Money is Used
/// ```text
/// Currency.monthly_fee ──► BillBreakdown.base_fee ─┐
///                                                  ├──► subtotal ──► discount
/// TRANSACTION_FEE_RATE × over-threshold count ─────┘        │
///                                                           ▼
///                                   total = subtotal − discount (rounded)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount of pounds.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Rounds to two decimal places, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_decimal(dec!(4.125)).rounded().amount(), dec!(4.13));
    /// assert_eq!(Money::from_decimal(dec!(4.124)).rounded().amount(), dec!(4.12));
    /// ```
    pub fn rounded(&self) -> Money {
        let mut value = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        Money(value)
    }

    /// Multiplies a unit price by a quantity, which may be fractional.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let per_transaction = Money::from_decimal(dec!(0.10));
    /// assert_eq!(per_transaction.multiply_quantity(dec!(50)).amount(), dec!(5.00));
    /// assert_eq!(per_transaction.multiply_quantity(dec!(49.5)).amount(), dec!(4.95));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Money {
        Money(self.0 * qty)
    }

    /// Returns `rate` of this amount, where `rate` is a fraction (0.15 = 15%).
    ///
    /// The result is not rounded.
    #[inline]
    pub fn percentage(&self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows pounds with two decimals, e.g. `£25.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-£{:.2}", rounded.abs())
        } else {
            write!(f, "£{:.2}", rounded.abs())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// JSON numbers in both directions.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_decimal(dec!(25)).to_string(), "£25.00");
        assert_eq!(Money::from_decimal(dec!(4.5)).to_string(), "£4.50");
        assert_eq!(Money::from_decimal(dec!(-5.5)).to_string(), "-£5.50");
        assert_eq!(Money::zero().to_string(), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_decimal(dec!(50));
        let b = Money::from_decimal(dec!(5));

        assert_eq!((a + b).amount(), dec!(55));
        assert_eq!((a - b).amount(), dec!(45));
        assert_eq!(b.multiply_quantity(dec!(3)).amount(), dec!(15));
        assert_eq!((a + b).percentage(dec!(0.2)).amount(), dec!(11.0));
    }

    #[test]
    fn test_rate_multiplication_is_exact() {
        // 150 × 0.10 drifts in binary floating point
        let fee = Money::from_decimal(dec!(0.10)).multiply_quantity(dec!(150));
        assert_eq!(fee.amount(), dec!(15));
    }

    #[test]
    fn test_rounded_always_has_two_places() {
        let rounded = Money::from_decimal(dec!(44)).rounded();
        assert_eq!(rounded.amount().scale(), 2);
        assert_eq!(rounded.amount().to_string(), "44.00");

        let rounded = Money::from_decimal(dec!(19.98765)).rounded();
        assert_eq!(rounded.amount().to_string(), "19.99");
    }

    #[test]
    fn test_rounded_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(0.005)).rounded().amount(), dec!(0.01));
        assert_eq!(Money::from_decimal(dec!(-0.005)).rounded().amount(), dec!(-0.01));
        assert_eq!(Money::from_decimal(dec!(2.675)).rounded().amount(), dec!(2.68));
    }

    #[test]
    fn test_fractional_quantity() {
        let fee = Money::from_decimal(dec!(0.10)).multiply_quantity(dec!(49.5));
        assert_eq!(fee.amount(), dec!(4.95));
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_json_is_a_number() {
        let json = serde_json::to_string(&Money::from_decimal(dec!(25.5))).unwrap();
        assert_eq!(json, "25.5");

        let parsed: Money = serde_json::from_str("0.15").unwrap();
        assert_eq!(parsed.amount(), dec!(0.15));

        let parsed: Money = serde_json::from_str("25").unwrap();
        assert_eq!(parsed.amount(), dec!(25));
    }
}
