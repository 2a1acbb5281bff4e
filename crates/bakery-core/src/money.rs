//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹50.00 is stored as 5000 paise                                       │
//! │    Line totals, subtotals and balances stay exact                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bakery_core::money::Money;
//!
//! let price = Money::from_rupees(50);      // ₹50.00
//! let line = price.multiply_quantity(2);   // ₹100.00
//! assert_eq!(line.paise(), 10_000);
//! assert_eq!(line.to_string(), "₹100.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount larger than the subtotal produces a
///   negative final total, and that has to be representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare integer**: the frontend receives paise
/// - **Saturating arithmetic**: sums over a long sales history clamp at the
///   i64 bounds instead of panicking; form inputs are bounded separately
///   (see `validation::validate_price` and `validation::validate_amount`)
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► LineItem.unit_price ──► LineItem.line_total
///                                                  │
///                         Cart.subtotal ◄──────────┘
///                              │
///                              ▼
///                 subtotal − discount = Sale.final_total
///
/// BulkOrder.total − advance_paid = BulkOrder.balance
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bakery_core::money::Money;
    ///
    /// let price = Money::from_paise(4550); // ₹45.50
    /// assert_eq!(price.paise(), 4550);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Bakery prices are almost always whole rupees, so this is the
    /// constructor the seed data and tests reach for.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bakery_core::money::Money;
    ///
    /// let croissant = Money::from_rupees(45);
    /// assert_eq!(croissant.multiply_quantity(3), Money::from_rupees(135));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `₹130.00` / `-₹5.50`.
///
/// Digit grouping is left to the frontend (`ConfigState::format_currency`
/// in the dashboard handles the configured symbol).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
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
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(50);
        assert_eq!(money.paise(), 5000);
        assert_eq!(money.rupees(), 50);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_paise(i64::MAX);
        let min = Money::from_paise(i64::MIN);

        assert_eq!(max + Money::from_paise(1), max);
        assert_eq!(Money::zero() - min, max);
        assert_eq!(Money::from_paise(i64::MAX / 2).multiply_quantity(3), max);
        assert_eq!(min * 2, min);

        let mut total = max;
        total += Money::from_rupees(1);
        assert_eq!(total, max);
        let sum: Money = [max, max].into_iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupees(130).to_string(), "₹130.00");
        assert_eq!(Money::from_paise(4550).to_string(), "₹45.50");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!(a + b, Money::from_rupees(15));
        assert_eq!(a - b, Money::from_rupees(5));
        assert_eq!(a * 3, Money::from_rupees(30));
        assert!((b - a).is_negative());
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_rupees(100), Money::from_rupees(30)];
        let owned: Money = lines.iter().copied().sum();
        let borrowed: Money = lines.iter().sum();
        assert_eq!(owned, Money::from_rupees(130));
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_paise(1).is_positive());
        assert!(Money::from_paise(-1).is_negative());
        assert_eq!(Money::from_paise(-250).abs().paise(), 250);
    }

    #[test]
    fn test_serializes_as_bare_paise() {
        let json = serde_json::to_string(&Money::from_rupees(12)).unwrap();
        assert_eq!(json, "1200");
    }
}
