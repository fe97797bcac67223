//! # Pricing Module
//!
//! Nightly subtotal, tiered discount, tax, and grand total for a
//! validated stay.
//!
//! ## The Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_total                                      │
//! │                                                                         │
//! │  raw_subtotal = nights × base_rate           (exact, integer sen)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tier:  nights >= 28  → monthly discount                               │
//! │         nights >= 7   → weekly discount                                │
//! │         otherwise     → no discount                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount = raw_subtotal × tier rate         (rounded to sen)          │
//! │  subtotal = raw_subtotal - discount                                    │
//! │  taxes    = subtotal × tax rate              (rounded to sen)          │
//! │  total    = subtotal + taxes                 (exact sum)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens only inside the two rate multiplies; sums and
//! differences of sen are exact, so no error accumulates.

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percentage};
use crate::types::PricingBreakdown;
use crate::{MONTHLY_TIER_NIGHTS, WEEKLY_TIER_NIGHTS};

/// Picks the discount tier for a stay length.
///
/// Monthly (28+ nights) wins over weekly (7+ nights); short stays get
/// no discount.
pub fn discount_for(nights: i64, weekly: Percentage, monthly: Percentage) -> Percentage {
    if nights >= MONTHLY_TIER_NIGHTS {
        monthly
    } else if nights >= WEEKLY_TIER_NIGHTS {
        weekly
    } else {
        Percentage::zero()
    }
}

/// Prices a validated stay.
///
/// `nights` must come from a validated [`crate::types::DateRange`];
/// zero or negative nights fail fast with [`CoreError::ZeroNights`].
///
/// ## Example
/// ```rust
/// use homestay_core::money::{Money, Percentage};
/// use homestay_core::pricing::compute_total;
///
/// let breakdown = compute_total(
///     30,
///     Money::from_ringgit(100),
///     Percentage::from_percent(10),
///     Percentage::from_percent(20),
///     Percentage::from_bps(600),
/// )
/// .unwrap();
///
/// // Monthly tier applies
/// assert_eq!(breakdown.subtotal_sen, 240_000); // RM2400.00
/// assert_eq!(breakdown.total_sen, 254_400);    // RM2544.00
/// ```
pub fn compute_total(
    nights: i64,
    base_rate: Money,
    weekly_discount: Percentage,
    monthly_discount: Percentage,
    tax_rate: Percentage,
) -> CoreResult<PricingBreakdown> {
    if nights <= 0 {
        return Err(CoreError::ZeroNights);
    }

    let raw_subtotal = base_rate.multiply_nights(nights);
    let tier = discount_for(nights, weekly_discount, monthly_discount);
    let discount = raw_subtotal.rate_amount(tier);
    let subtotal = raw_subtotal - discount;
    let taxes = subtotal.rate_amount(tax_rate);
    let total = subtotal + taxes;

    Ok(PricingBreakdown {
        nights,
        subtotal_sen: subtotal.sen(),
        discount_sen: discount.sen(),
        taxes_sen: taxes.sen(),
        total_sen: total.sen(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(p: u32) -> Percentage {
        Percentage::from_percent(p)
    }

    fn tax() -> Percentage {
        Percentage::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }

    #[test]
    fn test_no_discount_under_seven_nights() {
        let b = compute_total(3, Money::from_ringgit(180), pct(10), pct(20), tax()).unwrap();

        assert_eq!(b.nights, 3);
        assert_eq!(b.discount_sen, 0);
        assert_eq!(b.subtotal_sen, 54_000); // RM540.00
        assert_eq!(b.taxes_sen, 3_240); // RM32.40
        assert_eq!(b.total_sen, 57_240); // RM572.40
    }

    #[test]
    fn test_weekly_tier_reference_vector() {
        // 7 nights × RM100, 10% weekly, 6% tax
        let b = compute_total(7, Money::from_ringgit(100), pct(10), pct(20), tax()).unwrap();

        assert_eq!(b.discount_sen, 7_000); // RM70.00
        assert_eq!(b.subtotal_sen, 63_000); // RM630.00
        assert_eq!(b.taxes_sen, 3_780); // RM37.80
        assert_eq!(b.total_sen, 66_780); // RM667.80
    }

    #[test]
    fn test_monthly_tier_reference_vector() {
        // 30 nights × RM100, 20% monthly, 6% tax
        let b = compute_total(30, Money::from_ringgit(100), pct(10), pct(20), tax()).unwrap();

        assert_eq!(b.discount_sen, 60_000); // RM600.00
        assert_eq!(b.subtotal_sen, 240_000); // RM2400.00
        assert_eq!(b.taxes_sen, 14_400); // RM144.00
        assert_eq!(b.total_sen, 254_400); // RM2544.00
    }

    #[test]
    fn test_tier_boundaries() {
        let weekly = pct(10);
        let monthly = pct(20);

        assert_eq!(discount_for(6, weekly, monthly), Percentage::zero());
        assert_eq!(discount_for(7, weekly, monthly), weekly);
        assert_eq!(discount_for(27, weekly, monthly), weekly);
        assert_eq!(discount_for(28, weekly, monthly), monthly);
    }

    #[test]
    fn test_zero_nights_fails_fast() {
        let err = compute_total(0, Money::from_ringgit(100), pct(10), pct(20), tax());
        assert!(matches!(err, Err(CoreError::ZeroNights)));

        let err = compute_total(-2, Money::from_ringgit(100), pct(10), pct(20), tax());
        assert!(matches!(err, Err(CoreError::ZeroNights)));
    }

    #[test]
    fn test_total_is_subtotal_plus_taxes() {
        // Awkward rate to force rounding in both multiplies
        let b = compute_total(9, Money::from_sen(13_333), pct(7), pct(13), tax()).unwrap();
        assert_eq!(b.total_sen, b.subtotal_sen + b.taxes_sen);

        // raw = 119_997; discount 7% = 8_400 (8399.79 rounded);
        // subtotal = 111_597; tax 6% = 6_696 (6695.82 rounded)
        assert_eq!(b.discount_sen, 8_400);
        assert_eq!(b.subtotal_sen, 111_597);
        assert_eq!(b.taxes_sen, 6_696);
    }

    #[test]
    fn test_zero_tax_rate() {
        let b = compute_total(
            2,
            Money::from_ringgit(100),
            pct(10),
            pct(20),
            Percentage::zero(),
        )
        .unwrap();
        assert_eq!(b.taxes_sen, 0);
        assert_eq!(b.total_sen, b.subtotal_sen);
    }
}
