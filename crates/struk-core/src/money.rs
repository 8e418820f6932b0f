//! # Money Module
//!
//! Provides the `Money` type for handling Rupiah amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats drifts:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen                                              │
//! │    Rp 1 = 100 sen, every amount is an i64 count of sen                  │
//! │    Floats appear only at the parsing boundary (form text, JSON)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rupiah is displayed without fractional digits, but prices typed by the
//! user (or returned by the receipt service) may carry them, so the ledger
//! keeps two decimal places internally.
//!
//! ## Usage
//! ```rust
//! use struk_core::money::Money;
//!
//! let price = Money::from_rupiah(15_000);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.sen(), 3_000_000);
//! assert_eq!(line.rupiah_rounded(), 30_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::currency::format_rupiah_manual;

/// Sen per rupiah.
pub const SEN_PER_RUPIAH: i64 = 100;

/// Largest magnitude accepted from floating point input, in sen.
///
/// Keeps `f64 → i64` conversion exact enough and leaves headroom for sums.
const MAX_FLOAT_SEN: f64 = 9.0e15;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in sen (1/100 rupiah).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative lines (discounts typed as prices)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  "15000" (form) ──► LineItem.unit_price ──► LineItem.line_total         │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │  Ledger::subtotal ◄──────────────────────── sum of lines                │
/// │                                                                         │
/// │  Service JSON "total" ──► ConfirmedReceipt.total ──► "Rp 35.000"        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from sen.
    #[inline]
    pub const fn from_sen(sen: i64) -> Self {
        Money(sen)
    }

    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use struk_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupiah(5_000).sen(), 500_000);
    /// ```
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah.saturating_mul(SEN_PER_RUPIAH))
    }

    /// Converts a rupiah amount given as a float (form text, JSON number).
    ///
    /// Returns `None` for NaN, infinities and magnitudes too large to keep
    /// sen-exact. Rounds to the nearest sen.
    ///
    /// ## Example
    /// ```rust
    /// use struk_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_rupiah(1500.25), Some(Money::from_sen(150_025)));
    /// assert_eq!(Money::try_from_rupiah(f64::NAN), None);
    /// ```
    pub fn try_from_rupiah(rupiah: f64) -> Option<Self> {
        if !rupiah.is_finite() {
            return None;
        }
        let sen = (rupiah * SEN_PER_RUPIAH as f64).round();
        if sen.abs() > MAX_FLOAT_SEN {
            return None;
        }
        Some(Money(sen as i64))
    }

    /// Returns the value in sen.
    #[inline]
    pub const fn sen(&self) -> i64 {
        self.0
    }

    /// Returns the value as a float rupiah amount (wire format only).
    pub fn as_rupiah_f64(&self) -> f64 {
        self.0 as f64 / SEN_PER_RUPIAH as f64
    }

    /// Returns true when the amount has no fractional rupiah part.
    #[inline]
    pub const fn is_whole_rupiah(&self) -> bool {
        self.0 % SEN_PER_RUPIAH == 0
    }

    /// Rounds to whole rupiah, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use struk_core::money::Money;
    ///
    /// assert_eq!(Money::from_sen(150).rupiah_rounded(), 2);
    /// assert_eq!(Money::from_sen(149).rupiah_rounded(), 1);
    /// assert_eq!(Money::from_sen(-150).rupiah_rounded(), -2);
    /// ```
    pub const fn rupiah_rounded(&self) -> i64 {
        let half = SEN_PER_RUPIAH / 2;
        if self.0 < 0 {
            -((-(self.0 as i128) + half as i128) / SEN_PER_RUPIAH as i128) as i64
        } else {
            ((self.0 as i128 + half as i128) / SEN_PER_RUPIAH as i128) as i64
        }
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates instead of overflowing; a saturated line is still larger
    /// than anything the receipt service would accept.
    ///
    /// ## Example
    /// ```rust
    /// use struk_core::money::Money;
    ///
    /// let unit_price = Money::from_rupiah(15_000);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_rupiah(30_000));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as `Rp 35.000` (the locale-independent rendering).
///
/// Locale-aware display goes through [`crate::currency::RupiahFormatter`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_rupiah_manual(*self))
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
