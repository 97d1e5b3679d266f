//! # Money Module
//!
//! Prices and cart totals as integer cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Real-number prices drift when summed:                                 │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  Storage is i64 cents:                                                  │
//! │    Prices arrive as reals (999.99) and are converted ONCE to cents.    │
//! │    Cart totals are exact sums of cents.                                │
//! │    Reals reappear only at the storage / wire boundary (`decimal`).     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_major(999.99);
//! assert_eq!(price.cents(), 99_999);
//!
//! let line_total = price * 2;
//! assert_eq!(line_total.to_string(), "$1999.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: derives serialize as cents; use [`decimal`] for real-number fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a real amount in major units.
    ///
    /// Rounds to the nearest cent. Non-finite input (NaN, ±∞) becomes zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(19.99).cents(), 1999);
    /// assert_eq!(Money::from_major(f64::NAN), Money::zero());
    /// ```
    pub fn from_major(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a real amount in major units.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Clamps negative amounts to zero.
    ///
    /// Catalog prices are non-negative; upstream data is coerced through this.
    #[inline]
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`, matching the storefront's price labels.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Real-number serde representation
// =============================================================================

/// Serializes `Money` as a real number in major units (`999.99`).
///
/// Used with `#[serde(with = "crate::money::decimal")]` on fields that cross
/// the storage or HTTP boundary, where prices are plain JSON numbers.
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_major(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parts() {
        let laptop = Money::from_cents(99_999);
        assert_eq!(laptop.dollars(), 999);
        assert_eq!(laptop.cents_part(), 99);
        assert_eq!(Money::from_cents(-1_250).cents_part(), 50);
    }

    #[test]
    fn test_from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(999.99).cents(), 99_999);
        assert_eq!(Money::from_major(8.99).cents(), 899);
        assert_eq!(Money::from_major(0.005).cents(), 1);
        assert_eq!(Money::from_major(10.0).cents(), 1000);
    }

    #[test]
    fn test_from_major_non_finite_is_zero() {
        assert!(Money::from_major(f64::NAN).is_zero());
        assert!(Money::from_major(f64::INFINITY).is_zero());
        assert!(Money::from_major(f64::NEG_INFINITY).is_zero());
    }

    #[test]
    fn test_non_negative_clamps() {
        assert_eq!(Money::from_cents(-550).non_negative(), Money::zero());
        assert_eq!(Money::from_cents(550).non_negative().cents(), 550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(99_999).to_string(), "$999.99");
        assert_eq!(Money::from_cents(899).to_string(), "$8.99");
        assert_eq!(Money::from_cents(700).to_string(), "$7.00");
        assert_eq!(Money::from_cents(-1_250).to_string(), "-$12.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let book = Money::from_cents(1_499);
        let notebook = Money::from_cents(899);

        assert_eq!((book + notebook).cents(), 2_398);
        assert_eq!((book * 3).cents(), 4_497);

        let mut running = Money::zero();
        running += notebook;
        assert_eq!(running, notebook);

        let total: Money = [book * 2, notebook].into_iter().sum();
        assert_eq!(total.to_string(), "$38.97");
    }

    #[test]
    fn test_huge_prices_saturate() {
        let huge = Money::from_major(5e16);
        assert_eq!(huge.cents(), 5_000_000_000_000_000_000);
        assert_eq!((huge * 2).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let mut running = huge;
        running += huge;
        assert_eq!(running.cents(), i64::MAX);

        let total: Money = [huge, huge, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_real_sums_do_not_drift() {
        // 0.1 + 0.2 in cents is exactly 30
        let total = Money::from_major(0.1) + Money::from_major(0.2);
        assert_eq!(total.cents(), 30);
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Priced {
            #[serde(with = "crate::money::decimal")]
            price: Money,
        }

        let json = serde_json::to_string(&Priced {
            price: Money::from_cents(99_999),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":999.99}"#);

        let back: Priced = serde_json::from_str(r#"{"price":49.99}"#).unwrap();
        assert_eq!(back.price.cents(), 4999);

        // Integer JSON numbers are accepted as well
        let back: Priced = serde_json::from_str(r#"{"price":10}"#).unwrap();
        assert_eq!(back.price.cents(), 1000);
    }
}
