//! # Reservation Service
//!
//! The composition root: wires the property catalog, the reservation
//! store, and the notification dispatcher behind one API.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   reserve() Pipeline                                    │
//! │                                                                         │
//! │  request ──► catalog lookup ──► guest validation ──► capacity check    │
//! │                                                          │              │
//! │                                              payment confirmed?         │
//! │                                               no │        │ yes         │
//! │                                  PaymentRequired ◄┘        ▼            │
//! │                            ┌──────────────────────────────────────┐    │
//! │                            │ attempt (at most twice)              │    │
//! │                            │   snapshot blocked ─► validate range │    │
//! │                            │   ─► price ─► store.try_reserve      │    │
//! │                            │        lost race? retry once,        │    │
//! │                            │        then Conflict                 │    │
//! │                            └──────────────────────────────────────┘    │
//! │                                                          │              │
//! │                                        notify ◄── committed booking    │
//! │                                                                         │
//! │  No booking is ever returned to the caller unless its dates were       │
//! │  claimed atomically inside the store.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation takes `today` explicitly so callers (and tests)
//! control the clock.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use homestay_core::availability::{self, StayRules};
use homestay_core::classify::classify;
use homestay_core::{
    validation, Booking, BookingId, BookingStatus, Bucket, CoreError, GuestDetails, Percentage,
    PricingBreakdown, Property, PropertyId, DEFAULT_TAX_RATE_BPS,
};

use crate::catalog::PropertyCatalog;
use crate::error::{BookingError, BookingResult};
use crate::notify::{LogNotifier, NotificationDispatcher};
use crate::pricing_for;
use crate::store::{BookingDraft, ReservationStore};

// =============================================================================
// Configuration
// =============================================================================

/// Deployment-level knobs for the booking layer.
#[derive(Debug, Clone, Copy)]
pub struct BookingConfig {
    /// Tax applied to the discounted subtotal.
    pub tax_rate: Percentage,
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            tax_rate: Percentage::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }
}

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// A guest's reservation request as submitted from the booking form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub property_id: PropertyId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest: GuestDetails,
    /// Set by the payment step. Reservation is refused without it.
    pub payment_confirmed: bool,
}

/// Calendar payload for one property: live blocked dates plus the
/// stay rules the picker enforces client-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityView {
    pub property_id: PropertyId,
    /// Ascending, deduplicated.
    pub blocked_dates: Vec<NaiveDate>,
    pub min_stay: u32,
    pub max_stay: u32,
    pub advance_booking_days: u32,
    pub base_rate_sen: i64,
}

/// A priced stay before any commitment is made.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub property_id: PropertyId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub pricing: PricingBreakdown,
}

/// Dashboard filter. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    pub property_id: Option<PropertyId>,
    pub bucket: Option<Bucket>,
}

/// A booking as shown on dashboards: the stored record plus the
/// derived lifecycle bucket and effective status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub booking: Booking,
    pub bucket: Bucket,
    /// `Completed` once checkout has passed, even though the stored
    /// status stays `Confirmed`.
    pub effective_status: BookingStatus,
}

impl BookingView {
    fn derive(booking: Booking, today: NaiveDate) -> Self {
        let bucket = classify(&booking, today);
        let effective_status =
            if booking.status == BookingStatus::Confirmed && booking.check_out <= today {
                BookingStatus::Completed
            } else {
                booking.status
            };
        BookingView {
            booking,
            bucket,
            effective_status,
        }
    }
}

// =============================================================================
// Reservation Service
// =============================================================================

/// The booking API. Cheap to clone behind `Arc`s; all state lives in
/// the store.
pub struct ReservationService {
    catalog: Arc<dyn PropertyCatalog>,
    store: Arc<ReservationStore>,
    notifier: Arc<dyn NotificationDispatcher>,
    config: BookingConfig,
}

impl ReservationService {
    /// Creates a service over a catalog with log-only notifications.
    pub fn new(catalog: Arc<dyn PropertyCatalog>, config: BookingConfig) -> Self {
        ReservationService {
            catalog,
            store: Arc::new(ReservationStore::new()),
            notifier: Arc::new(LogNotifier),
            config,
        }
    }

    /// Swaps the notification dispatcher.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Direct store access, for dashboards that bypass the service.
    pub fn store(&self) -> Arc<ReservationStore> {
        Arc::clone(&self.store)
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// All listed properties.
    pub fn list_properties(&self) -> Vec<Property> {
        self.catalog.all()
    }

    fn property(&self, property_id: PropertyId) -> BookingResult<Property> {
        self.catalog
            .get(property_id)
            .ok_or(BookingError::PropertyNotFound(property_id))
    }

    // -------------------------------------------------------------------------
    // Availability
    // -------------------------------------------------------------------------

    /// The live calendar payload for one property.
    ///
    /// Blocked dates merge the catalog's owner blocks with the nights
    /// held by confirmed bookings, as of this call.
    pub fn get_availability(&self, property_id: PropertyId) -> BookingResult<AvailabilityView> {
        let property = self.property(property_id)?;
        let blocked = self.store.blocked_dates(&property);
        Ok(AvailabilityView {
            property_id,
            blocked_dates: blocked.into_iter().collect(),
            min_stay: property.min_stay,
            max_stay: property.max_stay,
            advance_booking_days: property.advance_booking_days,
            base_rate_sen: property.base_rate_sen,
        })
    }

    // -------------------------------------------------------------------------
    // Quote
    // -------------------------------------------------------------------------

    /// Validates a range and prices it without reserving anything.
    ///
    /// A quote is non-binding: it holds no dates and is stale the
    /// moment availability changes.
    pub fn quote(
        &self,
        property_id: PropertyId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        today: NaiveDate,
    ) -> BookingResult<Quote> {
        let property = self.property(property_id)?;
        if guests > property.max_guests {
            return Err(BookingError::CapacityExceeded {
                guests,
                max_guests: property.max_guests,
            });
        }
        let blocked = self.store.blocked_dates(&property);
        let range =
            availability::validate_range(check_in, check_out, &blocked, today, &rules(&property))
                .map_err(|err| match err {
                    CoreError::DateBlocked { date } => BookingError::Unavailable { date },
                    other => other.into(),
                })?;
        let pricing = pricing_for(&property, range.nights(), self.config.tax_rate)?;
        Ok(Quote {
            property_id,
            check_in,
            check_out,
            pricing,
        })
    }

    // -------------------------------------------------------------------------
    // Reserve
    // -------------------------------------------------------------------------

    /// Creates a reservation.
    ///
    /// Guest details, capacity, and payment are checked before any
    /// dates are touched; a failed request never mutates the store.
    /// If the store reports the range taken at commit time (another
    /// writer won the race since our availability snapshot), the
    /// attempt is retried once against fresh state before surfacing
    /// [`BookingError::Conflict`].
    pub fn reserve(&self, request: &ReservationRequest, today: NaiveDate) -> BookingResult<Booking> {
        let property = self.property(request.property_id)?;

        validation::validate_guest_details(&request.guest)?;
        if request.guest.guests > property.max_guests {
            return Err(BookingError::CapacityExceeded {
                guests: request.guest.guests,
                max_guests: property.max_guests,
            });
        }
        if !request.payment_confirmed {
            return Err(BookingError::PaymentRequired);
        }

        let stay_rules = rules(&property);
        for attempt in 0..2 {
            let blocked = self.store.blocked_dates(&property);
            let range = match availability::validate_range(
                request.check_in,
                request.check_out,
                &blocked,
                today,
                &stay_rules,
            ) {
                Ok(range) => range,
                // After a lost race the winner's nights are in the
                // snapshot; that is a conflict, not a user error.
                Err(CoreError::DateBlocked { .. }) if attempt > 0 => {
                    return Err(BookingError::Conflict)
                }
                Err(err) => return Err(err.into()),
            };

            let pricing = pricing_for(&property, range.nights(), self.config.tax_rate)?;
            debug!(
                property_id = property.id,
                check_in = %request.check_in,
                nights = range.nights(),
                attempt,
                "attempting reservation"
            );

            match self.store.try_reserve(BookingDraft {
                property: &property,
                range,
                guest: &request.guest,
                pricing,
            }) {
                Ok(booking) => {
                    self.notifier.booking_confirmed(&booking);
                    return Ok(booking);
                }
                Err(BookingError::Unavailable { date }) if attempt == 0 => {
                    warn!(
                        property_id = property.id,
                        %date,
                        "reservation lost a race, retrying against fresh state"
                    );
                }
                Err(BookingError::Unavailable { .. }) => return Err(BookingError::Conflict),
                Err(err) => return Err(err),
            }
        }

        Err(BookingError::Conflict)
    }

    // -------------------------------------------------------------------------
    // Cancel
    // -------------------------------------------------------------------------

    /// Cancels a booking and releases its dates.
    pub fn cancel(&self, booking_id: BookingId, today: NaiveDate) -> BookingResult<Booking> {
        let cancelled = self.store.cancel(booking_id, today)?;
        self.notifier.booking_cancelled(&cancelled);
        Ok(cancelled)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Looks up one booking with its derived bucket.
    pub fn get_booking(&self, booking_id: BookingId, today: NaiveDate) -> BookingResult<BookingView> {
        let booking = self
            .store
            .get(booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        Ok(BookingView::derive(booking, today))
    }

    /// Bookings matching a dashboard filter, in creation order, each
    /// with its lifecycle bucket derived against `today`.
    pub fn list_bookings(&self, filter: BookingFilter, today: NaiveDate) -> Vec<BookingView> {
        let bookings = match filter.property_id {
            Some(property_id) => self.store.list_by_property(property_id),
            None => self.store.list_all(),
        };
        bookings
            .into_iter()
            .map(|b| BookingView::derive(b, today))
            .filter(|view| filter.bucket.map_or(true, |bucket| view.bucket == bucket))
            .collect()
    }
}

fn rules(property: &Property) -> StayRules {
    StayRules {
        min_stay: property.min_stay,
        max_stay: property.max_stay,
        advance_booking_days: property.advance_booking_days,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
