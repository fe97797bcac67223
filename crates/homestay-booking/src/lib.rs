//! # homestay-booking: Stateful Reservation Layer for Homestay Hub
//!
//! Everything that owns state or talks to the outside world lives
//! here; the rules themselves live in `homestay-core` and are pure.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              ★ homestay-booking (THIS CRATE) ★                          │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐   │
//! │  │ ReservationService│──►│ ReservationStore │   │  PropertyCatalog │   │
//! │  │  quote / reserve  │   │  per-property    │   │  (port + in-mem) │   │
//! │  │  cancel / list    │   │  locked ledgers  │   └──────────────────┘   │
//! │  └─────────┬────────┘   └──────────────────┘   ┌──────────────────┐   │
//! │            │                                    │ NotificationPort │   │
//! │            └───────────────────────────────────►│  (log dispatcher)│   │
//! │                                                 └──────────────────┘   │
//! │                                │                                        │
//! │                     homestay-core (pure rules)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`service`] - Composition root: quote, reserve, cancel, dashboards
//! - [`store`] - Double-booking prevention with per-property locking
//! - [`catalog`] - Property listing port and in-memory implementation
//! - [`notify`] - Confirmation/cancellation notification port
//! - [`error`] - Booking errors and wire-level reason codes

pub mod catalog;
pub mod error;
pub mod notify;
pub mod service;
pub mod store;

pub use catalog::{InMemoryCatalog, PropertyCatalog};
pub use error::{BookingError, BookingResult, ErrorResponse, ReasonCode};
pub use notify::{LogNotifier, NotificationDispatcher};
pub use service::{
    AvailabilityView, BookingConfig, BookingFilter, BookingView, Quote, ReservationRequest,
    ReservationService,
};
pub use store::{BookingDraft, ReservationStore};

use homestay_core::{pricing, CoreResult, Percentage, PricingBreakdown, Property};

/// Prices a stay at a property using its listed rate and discount
/// tiers.
pub fn pricing_for(
    property: &Property,
    nights: i64,
    tax_rate: Percentage,
) -> CoreResult<PricingBreakdown> {
    pricing::compute_total(
        nights,
        property.base_rate(),
        property.weekly_discount(),
        property.monthly_discount(),
        tax_rate,
    )
}
