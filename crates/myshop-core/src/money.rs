//! # Money Module
//!
//! Provides the `Won` type for monetary values.
//!
//! ## Why Integer Won?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Prices, balances and totals are whole won. There are no minor units,  │
//! │  so every amount is an exact i64 and no rounding ever happens on the   │
//! │  money path. The only rounding in the shop is the discount percentage, │
//! │  which is display-only and lives in `types::Good::discount_percent`.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use myshop_core::money::Won;
//!
//! let price = Won::new(1_000);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line, Won::new(3_000));
//! assert_eq!(line.to_string(), "3,000원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Won Type
// =============================================================================

/// A monetary amount in whole Korean won.
///
/// ## Design Decisions
/// - **i64 (signed)**: the store never produces a negative balance, but
///   intermediate differences (e.g. shortfall = total - balance) may be
///   negative and should not wrap
/// - **Serializes as a bare number** so the browser view sees `price: 1000`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Won(#[ts(type = "number")] i64);

impl Won {
    /// Creates an amount from whole won.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Won(amount)
    }

    /// Returns the amount in whole won.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Zero won.
    #[inline]
    pub const fn zero() -> Self {
        Won(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at `i64::MAX`.
    ///
    /// For display only. Anything that moves money uses
    /// [`Won::checked_multiply_quantity`].
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Won(self.0.saturating_mul(qty as i64))
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(amount) => Some(Won(amount)),
            None => None,
        }
    }

    /// Adds `other`, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Won) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(amount) => Some(Won(amount)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` when the result would be negative.
    ///
    /// ## Example
    /// ```rust
    /// use myshop_core::money::Won;
    ///
    /// let balance = Won::new(100_000);
    /// assert_eq!(balance.checked_debit(Won::new(2_000)), Some(Won::new(98_000)));
    /// assert_eq!(balance.checked_debit(Won::new(100_001)), None);
    /// ```
    pub fn checked_debit(&self, other: Won) -> Option<Won> {
        match self.0.checked_sub(other.0) {
            Some(rest) if rest >= 0 => Some(Won(rest)),
            _ => None,
        }
    }

    /// Formats the amount with thousands separators and no currency suffix.
    ///
    /// Matches `Number.prototype.toLocaleString("ko-KR")` for integers.
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as the storefront does: `1,000원`.
impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", self.grouped())
    }
}

impl Add for Won {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Won(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Won {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Won {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Won(self.0.saturating_sub(other.0))
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Self {
        iter.fold(Won::zero(), |acc, w| acc + w)
    }
}

impl<'a> Sum<&'a Won> for Won {
    fn sum<I: Iterator<Item = &'a Won>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Won::new(0).to_string(), "0원");
        assert_eq!(Won::new(500).to_string(), "500원");
        assert_eq!(Won::new(1_000).to_string(), "1,000원");
        assert_eq!(Won::new(100_001).to_string(), "100,001원");
        assert_eq!(Won::new(999_999_999).to_string(), "999,999,999원");
        assert_eq!(Won::new(-3_000).to_string(), "-3,000원");
    }

    #[test]
    fn test_grouped_without_suffix() {
        assert_eq!(Won::new(100_000_000).grouped(), "100,000,000");
        assert_eq!(Won::new(12).grouped(), "12");
    }

    #[test]
    fn test_arithmetic() {
        let a = Won::new(1_000);
        let b = Won::new(500);

        assert_eq!(a + b, Won::new(1_500));
        assert_eq!(a - b, Won::new(500));
        assert_eq!(a.multiply_quantity(3), Won::new(3_000));

        let total: Won = [a, b, b].iter().sum();
        assert_eq!(total, Won::new(2_000));
    }

    #[test]
    fn test_checked_debit_never_goes_negative() {
        let balance = Won::new(100_000);
        assert_eq!(balance.checked_debit(balance), Some(Won::zero()));
        assert_eq!(balance.checked_debit(Won::new(100_001)), None);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let huge = Won::new(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(4), Won::new(i64::MAX));
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        let huge = Won::new(i64::MAX / 2);
        assert_eq!(huge.checked_multiply_quantity(2), Some(Won::new(i64::MAX - 1)));
        assert_eq!(huge.checked_multiply_quantity(3), None);

        assert_eq!(Won::new(1).checked_add(Won::new(2)), Some(Won::new(3)));
        assert_eq!(Won::new(i64::MAX).checked_add(Won::new(1)), None);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Won::new(1_000)).unwrap();
        assert_eq!(json, "1000");

        let back: Won = serde_json::from_str("30000").unwrap();
        assert_eq!(back, Won::new(30_000));
    }
}
