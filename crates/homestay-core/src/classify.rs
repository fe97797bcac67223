//! # Booking Classification
//!
//! Derives the lifecycle bucket of a booking relative to "today",
//! used to partition the guest and owner dashboards.
//!
//! ## Bucket Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      classify(booking, today)                           │
//! │                                                                         │
//! │  status == cancelled ─────────────────────────► Cancelled              │
//! │       │ (status wins over dates)                                       │
//! │       ▼                                                                 │
//! │  check_in <= today < check_out ───────────────► Current                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  today < check_in ────────────────────────────► Upcoming               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  otherwise (check_out <= today) ──────────────► Past                   │
//! │                                                                         │
//! │  Total: every booking lands in exactly one bucket. Advancing           │
//! │  today only ever moves Upcoming → Current → Past, and nothing          │
//! │  ever leaves Cancelled.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Past` covers both stored `completed` status and any confirmed
//! booking whose check-out has passed - completion is derived, never
//! written back to the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Booking, BookingStatus};

/// Lifecycle bucket for dashboard partitioning. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Stay has not started.
    Upcoming,
    /// Guest is currently staying.
    Current,
    /// Stay has finished (or status is completed).
    Past,
    /// Booking was cancelled.
    Cancelled,
}

/// Maps a booking to its bucket for a given `today`.
///
/// Pure, idempotent, and total; see the module docs for the ordering
/// guarantees the dashboards rely on.
pub fn classify(booking: &Booking, today: NaiveDate) -> Bucket {
    if booking.status == BookingStatus::Cancelled {
        return Bucket::Cancelled;
    }
    if booking.check_in <= today && today < booking.check_out {
        return Bucket::Current;
    }
    if today < booking.check_in {
        return Bucket::Upcoming;
    }
    Bucket::Past
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, PaymentStatus};
    use chrono::Utc;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn booking(status: BookingStatus, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            id: 1,
            property_id: 1,
            property_name: "Cozy Traditional Malay House".to_string(),
            property_location: "Malacca, Malacca".to_string(),
            guest_name: "Siti Aminah".to_string(),
            guest_email: "siti@example.com".to_string(),
            guest_phone: "+60123456789".to_string(),
            guests: 2,
            check_in,
            check_out,
            subtotal_sen: 54_000,
            discount_sen: 0,
            taxes_sen: 3_240,
            total_sen: 57_240,
            status,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::BayarCash,
            special_requests: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_upcoming() {
        let b = booking(BookingStatus::Confirmed, d(10), d(13));
        assert_eq!(classify(&b, d(5)), Bucket::Upcoming);
    }

    #[test]
    fn test_current_includes_checkin_day() {
        let b = booking(BookingStatus::Confirmed, d(10), d(13));
        assert_eq!(classify(&b, d(10)), Bucket::Current);
        assert_eq!(classify(&b, d(12)), Bucket::Current);
    }

    #[test]
    fn test_past_from_checkout_day() {
        let b = booking(BookingStatus::Confirmed, d(10), d(13));
        assert_eq!(classify(&b, d(13)), Bucket::Past);
        assert_eq!(classify(&b, d(20)), Bucket::Past);
    }

    #[test]
    fn test_completed_status_is_past() {
        let b = booking(BookingStatus::Completed, d(10), d(13));
        assert_eq!(classify(&b, d(20)), Bucket::Past);
    }

    #[test]
    fn test_cancelled_wins_over_dates() {
        let b = booking(BookingStatus::Cancelled, d(10), d(13));
        assert_eq!(classify(&b, d(5)), Bucket::Cancelled);
        assert_eq!(classify(&b, d(11)), Bucket::Cancelled);
        assert_eq!(classify(&b, d(20)), Bucket::Cancelled);
    }

    #[test]
    fn test_monotone_in_today() {
        // Advancing today never moves a non-cancelled booking backward.
        fn rank(bucket: Bucket) -> u8 {
            match bucket {
                Bucket::Upcoming => 0,
                Bucket::Current => 1,
                Bucket::Past => 2,
                Bucket::Cancelled => 3,
            }
        }

        let b = booking(BookingStatus::Confirmed, d(10), d(13));
        let mut prev = 0u8;
        for day in 1..=28 {
            let r = rank(classify(&b, d(day)));
            assert!(r >= prev, "bucket went backward on day {}", day);
            prev = r;
        }
    }
}
