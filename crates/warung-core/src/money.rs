//! # Money Module
//!
//! Provides the `Money` type for rupiah amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    cost × 1.3 drifts by fractions of a rupiah before rounding           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupiah                                           │
//! │    Rupiah has no minor unit in everyday use, so one unit = Rp 1.        │
//! │    Percentages are basis points with explicit rounding.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use warung_core::money::Money;
//!
//! let price = Money::from_rupiah(12_500);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.rupiah(), 37_500);
//! assert_eq!(line.to_string(), "Rp 37.500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::MAX_AMOUNT;

// =============================================================================
// Money Type
// =============================================================================

/// A rupiah amount.
///
/// ## Design Decisions
/// - **i64 (signed)**: net income, cash movement and equity can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serialises as a plain number
/// - **Saturating ops**: totals pin at the i64 bounds rather than wrap
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.price ──► Transaction.amount ──► JournalLine
///                                              │
///                                              ▼
///                              FinancialSummary / BalanceSheet
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Returns the value in whole rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
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

    /// Clamps negative amounts to zero.
    ///
    /// The synthetic cash balance is shown as `max(0, cash)`.
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use warung_core::money::Money;
    ///
    /// let unit_price = Money::from_rupiah(3_500);
    /// assert_eq!(unit_price.multiply_quantity(4).rupiah(), 14_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `bps / 10000` of this amount, rounded half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use warung_core::money::Money;
    ///
    /// // 10% of Rp 12.345 = Rp 1.234,5 → Rp 1.235
    /// assert_eq!(Money::from_rupiah(12_345).percentage(1000).rupiah(), 1_235);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large ledgers from overflowing before the division
        let scaled = self.0 as i128 * bps as i128;
        let half = if scaled < 0 { -5000 } else { 5000 };
        Money(((scaled + half) / 10000) as i64)
    }

    /// Adds a percentage markup, e.g. the 30% selling-price markup on restock.
    ///
    /// ## Example
    /// ```rust
    /// use warung_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupiah(12_500).apply_markup(3000).rupiah(), 16_250);
    /// ```
    pub fn apply_markup(&self, bps: u32) -> Money {
        *self + self.percentage(bps)
    }

    /// Parses an amount typed by a cashier.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "150000"       → Rp 150.000
    /// "150.000"      → Rp 150.000   (Indonesian thousands separator)
    /// "Rp 150.000"   → Rp 150.000
    /// "50rb" / "50k" → Rp 50.000
    /// "2jt"          → Rp 2.000.000
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let invalid = || ValidationError::invalid_format("amount", format!("'{}'", input.trim()));

        let mut text = input.trim().to_lowercase();
        if let Some(rest) = text.strip_prefix("rp") {
            text = rest.trim_start_matches('.').trim().to_string();
        }

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim()),
            None => (false, text.as_str()),
        };

        let (digits, multiplier) = if let Some(d) = body.strip_suffix("rb") {
            (d, 1_000)
        } else if let Some(d) = body.strip_suffix('k') {
            (d, 1_000)
        } else if let Some(d) = body.strip_suffix("jt") {
            (d, 1_000_000)
        } else {
            (body, 1)
        };

        let digits: String = digits.trim().chars().filter(|c| *c != '.').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let value: i64 = digits.parse().map_err(|_| invalid())?;
        let value = value.checked_mul(multiplier).ok_or_else(invalid)?;
        if value > MAX_AMOUNT {
            return Err(ValidationError::OutOfRange {
                field: "amount".to_string(),
                min: -MAX_AMOUNT,
                max: MAX_AMOUNT,
            });
        }
        Ok(Money(if negative { -value } else { value }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Indonesian formatting: `Rp 1.234.567`, `-Rp 5.000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, grouped)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
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
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
