//! # Money Module
//!
//! Provides the `Money` type for settled amounts in the local currency.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHOLE UNITS ONLY                                                       │
//! │                                                                         │
//! │  XOF / FCFA has no minor unit: a customs value of 3 053 480 FCFA is     │
//! │  an integer. Every allocated share and every published duty total is   │
//! │  therefore an i64 of whole francs.                                      │
//! │                                                                         │
//! │  Intermediate values (rate × base) are exact `Decimal`s and are only    │
//! │  turned into `Money` at the very end, with half-up rounding.            │
//! │                                                                         │
//! │    3 053 480 × 0.008 = 24 427.84  → 24 428                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//!
//! let caf = Money::from_units(3_053_480);
//! let first = Money::from_units(128_363);
//! assert_eq!((caf - first).units(), 2_925_117);
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole units of the settlement currency (XOF).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between allocations may be negative while
///   a share is being computed, even though published amounts never are
/// - **Single field tuple struct**: serializes as a plain JSON number
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Rounds a decimal amount to the nearest whole unit, halves away from zero.
    ///
    /// Values outside the `i64` range saturate; they cannot occur for real
    /// customs values but the conversion must not panic.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_decimal(dec!(24427.84)).units(), 24_428);
    /// assert_eq!(Money::from_decimal(dec!(2.5)).units(), 3);
    /// ```
    pub fn from_decimal(value: Decimal) -> Self {
        Self::checked_from_decimal(value).unwrap_or(if value.is_sign_negative() {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        })
    }

    /// Same rounding as [`Money::from_decimal`], `None` outside the `i64` range.
    pub fn checked_from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
    }

    /// Adds two amounts, `None` when the sum leaves the `i64` range.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Returns the amount as an exact decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with thin grouping and the currency suffix,
/// e.g. `3 053 480 FCFA`. Used in warnings and log lines.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{grouped} FCFA")
    }
}

// Arithmetic saturates at the i64 bounds instead of panicking.

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
