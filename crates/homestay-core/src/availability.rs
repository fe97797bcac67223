//! # Availability Module
//!
//! Per-date selectability and stay-range validation.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Availability Checks                                 │
//! │                                                                         │
//! │  Calendar render                                                        │
//! │  └── is_selectable(date) per cell → available / greyed out             │
//! │                                                                         │
//! │  Guest completes a selection                                            │
//! │  └── validate_range(check_in, check_out) → DateRange or reason         │
//! │                                                                         │
//! │  Quote / Reserve (booking layer)                                        │
//! │  └── validate_range again, against the store's live blocked set        │
//! │                                                                         │
//! │  Same function at every layer: one source of truth for what            │
//! │  "free" means.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check-out date is deliberately excluded from the blocked-date
//! scan: the departing guest leaves that morning, so another stay may
//! check in the same day.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::types::DateRange;

/// Stay limits a property imposes on any single booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRules {
    /// Minimum nights per stay.
    pub min_stay: u32,
    /// Maximum nights per stay.
    pub max_stay: u32,
    /// How far ahead of today a check-in may be, in days.
    pub advance_booking_days: u32,
}

/// Whether a single calendar date can be clicked at all.
///
/// A date is selectable iff it is not strictly before `today` (no
/// past dates) and not present in `blocked`.
///
/// ## Example
/// ```rust
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use homestay_core::availability::is_selectable;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let blocked = BTreeSet::from([NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()]);
///
/// assert!(is_selectable(today, &blocked, today));
/// assert!(!is_selectable(today.pred_opt().unwrap(), &blocked, today));
/// assert!(!is_selectable(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(), &blocked, today));
/// ```
pub fn is_selectable(date: NaiveDate, blocked: &BTreeSet<NaiveDate>, today: NaiveDate) -> bool {
    date >= today && !blocked.contains(&date)
}

/// Validates a proposed check-in/check-out pair against a property's
/// blocked dates and stay rules.
///
/// ## Checks (in order)
/// 1. `PastDate` - either endpoint before `today`
/// 2. `InvertedRange` - `check_out <= check_in`
/// 3. `BeyondHorizon` - check-in past the advance-booking window
/// 4. `DateBlocked` - any night in `[check_in, check_out)` is taken
/// 5. `StayTooShort` / `StayTooLong` - nights outside `[min, max]`
///
/// On success returns the normalized [`DateRange`].
pub fn validate_range(
    check_in: NaiveDate,
    check_out: NaiveDate,
    blocked: &BTreeSet<NaiveDate>,
    today: NaiveDate,
    rules: &StayRules,
) -> CoreResult<DateRange> {
    if check_in < today || check_out < today {
        return Err(CoreError::PastDate);
    }

    let range = DateRange::new(check_in, check_out)?;

    let horizon = today + chrono::Days::new(rules.advance_booking_days as u64);
    if check_in > horizon {
        return Err(CoreError::BeyondHorizon {
            horizon_days: rules.advance_booking_days,
        });
    }

    // The checkout night is excluded: the guest departs that morning.
    if let Some(date) = range.nights_iter().find(|d| blocked.contains(d)) {
        return Err(CoreError::DateBlocked { date });
    }

    let nights = range.nights();
    if nights < rules.min_stay as i64 {
        return Err(CoreError::StayTooShort {
            nights,
            min: rules.min_stay,
        });
    }
    if nights > rules.max_stay as i64 {
        return Err(CoreError::StayTooLong {
            nights,
            max: rules.max_stay,
        });
    }

    Ok(range)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rules() -> StayRules {
        StayRules {
            min_stay: 2,
            max_stay: 30,
            advance_booking_days: 365,
        }
    }

    const TODAY: (i32, u32, u32) = (2026, 3, 1);

    fn today() -> NaiveDate {
        d(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_is_selectable() {
        let blocked = BTreeSet::from([d(2026, 3, 5)]);

        assert!(is_selectable(d(2026, 3, 1), &blocked, today()));
        assert!(is_selectable(d(2026, 3, 6), &blocked, today()));
        // Past date
        assert!(!is_selectable(d(2026, 2, 28), &blocked, today()));
        // Blocked date
        assert!(!is_selectable(d(2026, 3, 5), &blocked, today()));
    }

    #[test]
    fn test_validate_range_happy_path() {
        let blocked = BTreeSet::new();
        let range =
            validate_range(d(2026, 3, 10), d(2026, 3, 13), &blocked, today(), &rules()).unwrap();
        assert_eq!(range.nights(), 3);
    }

    #[test]
    fn test_validate_range_rejects_past() {
        let blocked = BTreeSet::new();
        let err = validate_range(d(2026, 2, 20), d(2026, 2, 25), &blocked, today(), &rules());
        assert!(matches!(err, Err(CoreError::PastDate)));
    }

    #[test]
    fn test_validate_range_rejects_inverted() {
        let blocked = BTreeSet::new();
        let err = validate_range(d(2026, 3, 13), d(2026, 3, 10), &blocked, today(), &rules());
        assert!(matches!(err, Err(CoreError::InvertedRange)));

        // Zero-night "stay" is inverted too
        let err = validate_range(d(2026, 3, 10), d(2026, 3, 10), &blocked, today(), &rules());
        assert!(matches!(err, Err(CoreError::InvertedRange)));
    }

    #[test]
    fn test_validate_range_rejects_blocked_night() {
        let blocked = BTreeSet::from([d(2026, 3, 11)]);
        let err = validate_range(d(2026, 3, 10), d(2026, 3, 13), &blocked, today(), &rules());
        assert!(matches!(
            err,
            Err(CoreError::DateBlocked { date }) if date == d(2026, 3, 11)
        ));
    }

    #[test]
    fn test_validate_range_allows_checkout_on_blocked_date() {
        // The next guest checks in on the 13th; departing that morning
        // is fine.
        let blocked = BTreeSet::from([d(2026, 3, 13)]);
        assert!(
            validate_range(d(2026, 3, 10), d(2026, 3, 13), &blocked, today(), &rules()).is_ok()
        );
    }

    #[test]
    fn test_validate_range_stay_limits() {
        let blocked = BTreeSet::new();

        let err = validate_range(d(2026, 3, 10), d(2026, 3, 11), &blocked, today(), &rules());
        assert!(matches!(
            err,
            Err(CoreError::StayTooShort { nights: 1, min: 2 })
        ));

        let err = validate_range(d(2026, 3, 10), d(2026, 4, 15), &blocked, today(), &rules());
        assert!(matches!(
            err,
            Err(CoreError::StayTooLong { nights: 36, max: 30 })
        ));
    }

    #[test]
    fn test_validate_range_beyond_horizon() {
        let blocked = BTreeSet::new();
        let short_horizon = StayRules {
            advance_booking_days: 30,
            ..rules()
        };

        let err = validate_range(
            d(2026, 5, 1),
            d(2026, 5, 4),
            &blocked,
            today(),
            &short_horizon,
        );
        assert!(matches!(
            err,
            Err(CoreError::BeyondHorizon { horizon_days: 30 })
        ));

        // Exactly at the horizon is allowed
        assert!(validate_range(
            d(2026, 3, 31),
            d(2026, 4, 3),
            &blocked,
            today(),
            &short_horizon,
        )
        .is_ok());
    }

    #[test]
    fn test_validate_range_today_checkin_is_valid() {
        let blocked = BTreeSet::new();
        assert!(validate_range(today(), d(2026, 3, 4), &blocked, today(), &rules()).is_ok());
    }
}
