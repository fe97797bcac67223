//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The original prototype computed `subtotal * 0.06` in JavaScript:      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen                                              │
//! │    RM10.00 is stored as 1000 sen. Rates are basis points.              │
//! │    Rounding happens exactly once, at the rate-multiply step.           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use homestay_core::money::{Money, Percentage};
//!
//! // Create from sen (preferred)
//! let nightly = Money::from_sen(18_000); // RM180.00
//!
//! // Arithmetic operations
//! let week = nightly * 7;                        // RM1260.00
//! let tax = week.rate_amount(Percentage::from_bps(600)); // RM75.60
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Percentage
// =============================================================================

/// A rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 600 bps = 6% (the default booking tax)
/// 1000 bps = 10% (a typical weekly discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a rate from a whole percentage.
    ///
    /// Property catalogs store discounts as whole percents
    /// (`weeklyDiscount: 10`), so this is the common entry point.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Percentage(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (sen for MYR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type:
/// nightly rates, discounts, taxes, and booking totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from sen (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use homestay_core::money::Money;
    ///
    /// let rate = Money::from_sen(18_000); // Represents RM180.00
    /// assert_eq!(rate.sen(), 18_000);
    /// ```
    #[inline]
    pub const fn from_sen(sen: i64) -> Self {
        Money(sen)
    }

    /// Creates a Money value from whole ringgit.
    ///
    /// Catalog rates are quoted in whole ringgit (`basePrice: 180`).
    #[inline]
    pub const fn from_ringgit(ringgit: i64) -> Self {
        Money(ringgit * 100)
    }

    /// Returns the value in sen (smallest currency unit).
    #[inline]
    pub const fn sen(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (ringgit) portion.
    #[inline]
    pub const fn ringgit(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (sen) portion (always 0-99).
    #[inline]
    pub const fn sen_part(&self) -> i64 {
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

    /// Computes `self × rate`, rounded to the nearest sen.
    ///
    /// This is the single place monetary rounding happens: discounts
    /// and taxes are both rate-applications over an exact integer
    /// base, so no error accumulates across the pricing pipeline.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides standard rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use homestay_core::money::{Money, Percentage};
    ///
    /// let subtotal = Money::from_sen(63_000);        // RM630.00
    /// let tax = subtotal.rate_amount(Percentage::from_bps(600)); // 6%
    /// assert_eq!(tax.sen(), 3_780);                  // RM37.80
    /// ```
    pub fn rate_amount(&self, rate: Percentage) -> Money {
        // i128 prevents overflow on large amounts
        let sen = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_sen(sen as i64)
    }

    /// Multiplies money by a night count.
    ///
    /// ## Example
    /// ```rust
    /// use homestay_core::money::Money;
    ///
    /// let nightly = Money::from_sen(18_000); // RM180.00
    /// let stay = nightly.multiply_nights(3);
    /// assert_eq!(stay.sen(), 54_000);        // RM540.00
    /// ```
    #[inline]
    pub const fn multiply_nights(&self, nights: i64) -> Self {
        Money(self.0 * nights)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}RM{}.{:02}", sign, self.ringgit().abs(), self.sen_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for night counts).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, nights: i64) -> Self {
        Money(self.0 * nights)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
