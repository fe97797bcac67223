//! # Domain Types
//!
//! Core domain types used throughout Homestay Hub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Property     │   │    Booking      │   │   DateRange     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (u64, mono) │   │  check_in       │       │
//! │  │  base_rate_sen  │   │  status         │   │  check_out      │       │
//! │  │  min/max stay   │   │  total_sen      │   │  (out > in)     │       │
//! │  │  blocked_dates  │   │  guest fields   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  BookingStatus  │   │  PaymentStatus  │   │ PricingBreakdown│       │
//! │  │  Pending        │   │  Pending        │   │  subtotal_sen   │       │
//! │  │  Confirmed      │   │  Paid           │   │  discount_sen   │       │
//! │  │  Cancelled      │   │  Refunded       │   │  taxes_sen      │       │
//! │  │  Completed      │   └─────────────────┘   │  total_sen      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `PropertyId`: supplied by the external property catalog
//! - `BookingId`: unique and monotonically assigned by the store

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percentage};

/// Identifier of a property in the external catalog.
pub type PropertyId = u32;

/// Identifier of a booking, assigned monotonically by the store.
pub type BookingId = u64;

// =============================================================================
// Date Range
// =============================================================================

/// A half-open stay: nights `[check_in, check_out)`.
///
/// The check-out date itself is never occupied - the guest departs
/// that morning, so a new stay may check in the same day.
///
/// ## Invariant
/// `check_out` is strictly after `check_in`; both are calendar dates
/// with time-of-day ignored. Enforced by [`DateRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "String")]
    check_in: NaiveDate,
    #[ts(as = "String")]
    check_out: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> CoreResult<Self> {
        if check_out <= check_in {
            return Err(CoreError::InvertedRange);
        }
        Ok(DateRange {
            check_in,
            check_out,
        })
    }

    /// The check-in date.
    #[inline]
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// The check-out date (exclusive).
    #[inline]
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights in the stay. Always >= 1.
    #[inline]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Iterates the occupied nights: every date in `[check_in, check_out)`.
    pub fn nights_iter(&self) -> impl Iterator<Item = NaiveDate> {
        self.check_in.iter_days().take(self.nights() as usize)
    }

    /// Whether `date` falls on an occupied night of this stay.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }

    /// Whether two stays share at least one occupied night.
    ///
    /// Back-to-back stays (one checking out the day the other checks
    /// in) do NOT overlap.
    #[inline]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

// =============================================================================
// Property
// =============================================================================

/// A homestay property, supplied read-only by the external catalog.
///
/// The static rate and stay fields never change inside the core; the
/// `blocked_dates` here are the catalog's seed (owner blocks plus any
/// bookings that predate this process). The reservation store owns
/// the live blocked set from first touch onward.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Property {
    /// Catalog identifier.
    pub id: PropertyId,

    /// Display name shown on bookings and dashboards.
    pub name: String,

    /// City the property is in.
    pub city: String,

    /// State the property is in.
    pub state: String,

    /// Nightly base rate in sen.
    pub base_rate_sen: i64,

    /// Discount applied at 7+ nights, whole percent (10 = 10%).
    pub weekly_discount_pct: u32,

    /// Discount applied at 28+ nights, whole percent.
    pub monthly_discount_pct: u32,

    /// Minimum stay length in nights.
    pub min_stay: u32,

    /// Maximum stay length in nights.
    pub max_stay: u32,

    /// How far ahead of today a check-in may be, in days.
    pub advance_booking_days: u32,

    /// Maximum guests the property sleeps.
    pub max_guests: u32,

    /// Seed blocked dates (owner blocks + pre-existing bookings).
    #[ts(as = "Vec<String>")]
    pub blocked_dates: BTreeSet<NaiveDate>,

    /// When the listing was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Returns the nightly base rate as Money.
    #[inline]
    pub fn base_rate(&self) -> Money {
        Money::from_sen(self.base_rate_sen)
    }

    /// Returns the weekly discount rate.
    #[inline]
    pub fn weekly_discount(&self) -> Percentage {
        Percentage::from_percent(self.weekly_discount_pct)
    }

    /// Returns the monthly discount rate.
    #[inline]
    pub fn monthly_discount(&self) -> Percentage {
        Percentage::from_percent(self.monthly_discount_pct)
    }

    /// "City, State" as shown on booking records.
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// The lifecycle status of a booking.
///
/// `Completed` is derived at read time from `check_out <= today`; the
/// store never writes it. It exists as a variant so externally
/// sourced records carrying the status deserialize cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reservation accepted for processing, dates not yet committed.
    Pending,
    /// Payment acknowledged, dates committed to the blocked set.
    Confirmed,
    /// Cancelled before check-in; dates released.
    Cancelled,
    /// Stay finished (derived from dates, not stored).
    Completed,
}

impl BookingStatus {
    /// Terminal statuses admit no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

// =============================================================================
// Payment Status / Method
// =============================================================================

/// Payment state of a booking, driven by the external payment signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting the payment-confirmed signal.
    Pending,
    /// Payment acknowledged.
    Paid,
    /// Payment returned to the guest.
    Refunded,
}

/// How the guest chose to pay. Opaque to the core; recorded for
/// display and for the payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BayarCash,
    Card,
    Bank,
}

// =============================================================================
// Guest Details
// =============================================================================

/// Guest form input accompanying a reservation request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub guests: u32,
    pub payment_method: PaymentMethod,
    pub special_requests: Option<String>,
}

impl GuestDetails {
    /// "First Last" as shown on booking records.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

// =============================================================================
// Pricing Breakdown
// =============================================================================

///// The priced result of a quote: what the guest pays and why.
///
/// All amounts are in sen; the discount is already subtracted from
/// `subtotal_sen` (it is reported for display, not re-applied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingBreakdown {
    /// Nights priced.
    pub nights: i64,

    /// Nightly rate × nights, minus the tier discount.
    pub subtotal_sen: i64,

    /// Tier discount amount (0 for stays under 7 nights).
    pub discount_sen: i64,

    /// Tax on the discounted subtotal.
    pub taxes_sen: i64,

    /// Grand total: subtotal + taxes.
    pub total_sen: i64,
}

impl PricingBreakdown {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_sen(self.subtotal_sen)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_sen(self.discount_sen)
    }

    /// Returns the taxes as Money.
    #[inline]
    pub fn taxes(&self) -> Money {
        Money::from_sen(self.taxes_sen)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_sen(self.total_sen)
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A reservation record.
///
/// Uses the snapshot pattern: property name/location and the pricing
/// breakdown are frozen at reservation time, so dashboards stay
/// consistent even if the catalog listing changes later.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Booking {
    /// Unique, monotonically assigned by the store.
    pub id: BookingId,

    /// Property this stay is at.
    pub property_id: PropertyId,

    /// Property name at time of booking (frozen).
    pub property_name: String,

    /// "City, State" at time of booking (frozen).
    pub property_location: String,

    /// Guest full name.
    pub guest_name: String,

    /// Guest contact email.
    pub guest_email: String,

    /// Guest contact phone.
    pub guest_phone: String,

    /// Number of guests staying.
    pub guests: u32,

    /// Check-in date.
    #[ts(as = "String")]
    pub check_in: NaiveDate,

    /// Check-out date (exclusive).
    #[ts(as = "String")]
    pub check_out: NaiveDate,

    /// Subtotal in sen at time of booking (frozen).
    pub subtotal_sen: i64,

    /// Tier discount in sen at time of booking (frozen).
    pub discount_sen: i64,

    /// Taxes in sen at time of booking (frozen).
    pub taxes_sen: i64,

    /// Grand total in sen at time of booking (frozen).
    pub total_sen: i64,

    /// Lifecycle status.
    pub status: BookingStatus,

    /// Payment state.
    pub payment_status: PaymentStatus,

    /// How the guest paid.
    pub payment_method: PaymentMethod,

    /// Free-text guest requests.
    pub special_requests: Option<String>,

    /// When the reservation was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The booked stay as a range.
    ///
    /// Bookings are only ever constructed from a validated
    /// [`DateRange`], so this cannot fail in practice; a corrupted
    /// record surfaces as `InvertedRange`.
    pub fn range(&self) -> CoreResult<DateRange> {
        DateRange::new(self.check_in, self.check_out)
    }

    /// Number of nights booked.
    #[inline]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_sen(self.total_sen)
    }
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

    #[test]
    fn test_date_range_rejects_inverted() {
        assert!(DateRange::new(d(2026, 3, 10), d(2026, 3, 10)).is_err());
        assert!(DateRange::new(d(2026, 3, 10), d(2026, 3, 9)).is_err());
        assert!(DateRange::new(d(2026, 3, 10), d(2026, 3, 11)).is_ok());
    }

    #[test]
    fn test_date_range_nights() {
        let range = DateRange::new(d(2026, 3, 10), d(2026, 3, 13)).unwrap();
        assert_eq!(range.nights(), 3);

        let nights: Vec<NaiveDate> = range.nights_iter().collect();
        assert_eq!(nights, vec![d(2026, 3, 10), d(2026, 3, 11), d(2026, 3, 12)]);
    }

    #[test]
    fn test_date_range_contains_excludes_checkout() {
        let range = DateRange::new(d(2026, 3, 10), d(2026, 3, 13)).unwrap();
        assert!(range.contains(d(2026, 3, 10)));
        assert!(range.contains(d(2026, 3, 12)));
        assert!(!range.contains(d(2026, 3, 13)));
        assert!(!range.contains(d(2026, 3, 9)));
    }

    #[test]
    fn test_back_to_back_ranges_do_not_overlap() {
        let a = DateRange::new(d(2026, 3, 10), d(2026, 3, 13)).unwrap();
        let b = DateRange::new(d(2026, 3, 13), d(2026, 3, 15)).unwrap();
        let c = DateRange::new(d(2026, 3, 12), d(2026, 3, 14)).unwrap();

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_booking_status_terminal() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let json = serde_json::to_string(&PaymentStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
    }
}
