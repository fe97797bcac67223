//! # Reservation Store
//!
//! The single source of truth preventing double-booking.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Per-Property Locking                                   │
//! │                                                                         │
//! │  ReservationStore                                                       │
//! │  ├── ledgers: Mutex<HashMap<PropertyId, Arc<Mutex<PropertyLedger>>>>   │
//! │  │       (outer lock: map access only, held briefly)                   │
//! │  ├── index:   Mutex<HashMap<BookingId, PropertyId>>                    │
//! │  └── next_id: AtomicU64                                                │
//! │                                                                         │
//! │  reserve(property A) ──┐                                               │
//! │  cancel(booking on A) ─┼── serialize on A's ledger lock                │
//! │  reserve(property B) ──┘── proceeds independently on B's lock          │
//! │                                                                         │
//! │  Validate-then-commit runs entirely inside one ledger lock, so         │
//! │  no concurrent writer can slip between the check and the insert.       │
//! │  Reads snapshot under the same lock and release it immediately.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! For any property, the `[check_in, check_out)` ranges of all
//! confirmed bookings are pairwise disjoint, and every confirmed
//! night is present in the blocked set. Checked (debug builds) after
//! every mutation.
//!
//! No operation performs I/O or blocks on external calls while a
//! ledger lock is held.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use homestay_core::{
    Booking, BookingId, BookingStatus, DateRange, GuestDetails, PaymentStatus, PricingBreakdown,
    Property, PropertyId,
};

use crate::error::{BookingError, BookingResult};

// =============================================================================
// Property Ledger
// =============================================================================

/// Mutable per-property state: the live blocked-date set and the
/// property's bookings in creation order.
#[derive(Debug)]
struct PropertyLedger {
    blocked: BTreeSet<NaiveDate>,
    bookings: Vec<Booking>,
}

impl PropertyLedger {
    fn seeded_from(property: &Property) -> Self {
        PropertyLedger {
            blocked: property.blocked_dates.clone(),
            bookings: Vec::new(),
        }
    }

    /// Disjointness invariant: confirmed ranges pairwise disjoint and
    /// every confirmed night blocked.
    fn holds_invariant(&self) -> bool {
        let confirmed: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .collect();

        for (i, a) in confirmed.iter().enumerate() {
            for b in &confirmed[i + 1..] {
                let overlap = a.check_in < b.check_out && b.check_in < a.check_out;
                if overlap {
                    return false;
                }
            }
        }

        confirmed.iter().all(|b| {
            b.check_in
                .iter_days()
                .take(b.nights() as usize)
                .all(|night| self.blocked.contains(&night))
        })
    }
}

// =============================================================================
// Booking Draft
// =============================================================================

/// Everything needed to commit a reservation: a validated range, the
/// guest form, and the pricing snapshot from the quote.
#[derive(Debug)]
pub struct BookingDraft<'a> {
    pub property: &'a Property,
    pub range: DateRange,
    pub guest: &'a GuestDetails,
    pub pricing: PricingBreakdown,
}

// =============================================================================
// Reservation Store
// =============================================================================

/// Owns the authoritative booking state for every property.
///
/// An explicitly constructed component with controlled lifetime - no
/// process-wide globals. Ledgers are created lazily, seeded from the
/// catalog's blocked dates on first touch; from then on the store
/// exclusively owns the blocked set.
#[derive(Debug, Default)]
pub struct ReservationStore {
    ledgers: Mutex<HashMap<PropertyId, Arc<Mutex<PropertyLedger>>>>,
    index: Mutex<HashMap<BookingId, PropertyId>>,
    next_id: AtomicU64,
}

impl ReservationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ReservationStore {
            ledgers: Mutex::new(HashMap::new()),
            index: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Fetches (or lazily creates) the ledger for a property.
    ///
    /// The map lock is released before the caller locks the ledger,
    /// so operations on different properties never contend.
    fn ledger(&self, property: &Property) -> Arc<Mutex<PropertyLedger>> {
        let mut ledgers = self.ledgers.lock().expect("ledger map mutex poisoned");
        ledgers
            .entry(property.id)
            .or_insert_with(|| Arc::new(Mutex::new(PropertyLedger::seeded_from(property))))
            .clone()
    }

    fn ledger_by_id(&self, property_id: PropertyId) -> Option<Arc<Mutex<PropertyLedger>>> {
        let ledgers = self.ledgers.lock().expect("ledger map mutex poisoned");
        ledgers.get(&property_id).cloned()
    }

    /// Consistent snapshot of a property's blocked dates.
    pub fn blocked_dates(&self, property: &Property) -> BTreeSet<NaiveDate> {
        let ledger = self.ledger(property);
        let guard = ledger.lock().expect("ledger mutex poisoned");
        guard.blocked.clone()
    }

    /// Atomically re-validates the range against the live blocked set
    /// and commits the booking.
    ///
    /// Fails with [`BookingError::Unavailable`] naming the first
    /// taken night if a concurrent writer claimed an overlapping date
    /// since the caller's availability read. On failure the store is
    /// unchanged.
    pub fn try_reserve(&self, draft: BookingDraft<'_>) -> BookingResult<Booking> {
        let ledger = self.ledger(draft.property);
        let mut guard = ledger.lock().expect("ledger mutex poisoned");

        // Commit-time availability check, under the same lock as the
        // insert below.
        if let Some(date) = draft.range.nights_iter().find(|d| guard.blocked.contains(d)) {
            debug!(
                property_id = draft.property.id,
                %date,
                "reserve lost the range to a concurrent writer"
            );
            return Err(BookingError::Unavailable { date });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let booking = Booking {
            id,
            property_id: draft.property.id,
            property_name: draft.property.name.clone(),
            property_location: draft.property.location(),
            guest_name: draft.guest.full_name(),
            guest_email: draft.guest.email.trim().to_string(),
            guest_phone: draft.guest.phone.trim().to_string(),
            guests: draft.guest.guests,
            check_in: draft.range.check_in(),
            check_out: draft.range.check_out(),
            subtotal_sen: draft.pricing.subtotal_sen,
            discount_sen: draft.pricing.discount_sen,
            taxes_sen: draft.pricing.taxes_sen,
            total_sen: draft.pricing.total_sen,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_method: draft.guest.payment_method,
            special_requests: draft
                .guest
                .special_requests
                .as_deref()
                .map(|s| s.trim().to_string()),
            created_at: Utc::now(),
        };

        guard.blocked.extend(draft.range.nights_iter());
        guard.bookings.push(booking.clone());
        debug_assert!(guard.holds_invariant());
        drop(guard);

        self.index
            .lock()
            .expect("booking index mutex poisoned")
            .insert(id, draft.property.id);

        info!(
            booking_id = id,
            property_id = draft.property.id,
            check_in = %booking.check_in,
            nights = booking.nights(),
            total = %booking.total(),
            "reservation committed"
        );

        Ok(booking)
    }

    /// Cancels a booking, releasing its dates.
    ///
    /// ## Rules
    /// - Unknown id → `BookingNotFound`
    /// - Already cancelled, or checked out (stored or derived) →
    ///   `AlreadyTerminal`
    /// - `today >= check_in` → `PastCheckIn` (stay has begun)
    ///
    /// On success the booking's nights leave the blocked set and the
    /// record becomes `Cancelled`. Audit metadata aside, the record
    /// is immutable from then on.
    pub fn cancel(&self, booking_id: BookingId, today: NaiveDate) -> BookingResult<Booking> {
        let property_id = {
            let index = self.index.lock().expect("booking index mutex poisoned");
            *index
                .get(&booking_id)
                .ok_or(BookingError::BookingNotFound(booking_id))?
        };

        let ledger = self
            .ledger_by_id(property_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        let mut guard = ledger.lock().expect("ledger mutex poisoned");

        let booking = guard
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        if booking.status.is_terminal() {
            return Err(BookingError::AlreadyTerminal {
                id: booking_id,
                status: booking.status,
            });
        }
        if booking.check_out <= today {
            // Checked out without a stored transition: completed is
            // derived, but it is just as terminal.
            return Err(BookingError::AlreadyTerminal {
                id: booking_id,
                status: BookingStatus::Completed,
            });
        }
        if today >= booking.check_in {
            return Err(BookingError::PastCheckIn {
                id: booking_id,
                check_in: booking.check_in,
            });
        }

        booking.status = BookingStatus::Cancelled;
        let cancelled = booking.clone();

        let nights: Vec<NaiveDate> = cancelled
            .check_in
            .iter_days()
            .take(cancelled.nights() as usize)
            .collect();
        for night in nights {
            guard.blocked.remove(&night);
        }
        debug_assert!(guard.holds_invariant());
        drop(guard);

        info!(
            booking_id,
            property_id,
            check_in = %cancelled.check_in,
            "booking cancelled, dates released"
        );

        Ok(cancelled)
    }

    /// Looks up a single booking.
    pub fn get(&self, booking_id: BookingId) -> Option<Booking> {
        let property_id = {
            let index = self.index.lock().expect("booking index mutex poisoned");
            *index.get(&booking_id)?
        };
        let ledger = self.ledger_by_id(property_id)?;
        let guard = ledger.lock().expect("ledger mutex poisoned");
        guard.bookings.iter().find(|b| b.id == booking_id).cloned()
    }

    /// A property's bookings in creation order.
    pub fn list_by_property(&self, property_id: PropertyId) -> Vec<Booking> {
        match self.ledger_by_id(property_id) {
            Some(ledger) => {
                let guard = ledger.lock().expect("ledger mutex poisoned");
                guard.bookings.clone()
            }
            None => Vec::new(),
        }
    }

    /// All bookings across properties, in creation order.
    pub fn list_all(&self) -> Vec<Booking> {
        let ledgers: Vec<Arc<Mutex<PropertyLedger>>> = {
            let map = self.ledgers.lock().expect("ledger map mutex poisoned");
            map.values().cloned().collect()
        };

        let mut all = Vec::new();
        for ledger in ledgers {
            let guard = ledger.lock().expect("ledger mutex poisoned");
            all.extend(guard.bookings.iter().cloned());
        }
        // Ids are assigned monotonically, so id order is creation order.
        all.sort_by_key(|b| b.id);
        all
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
