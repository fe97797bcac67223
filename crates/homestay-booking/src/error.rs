//! # Booking Error Types
//!
//! Unified error type for the stateful booking layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in Homestay Hub                          │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  reserve(propertyId, dates)                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  ReservationService                                              │  │
//! │  │  Result<T, BookingError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Range invalid? ── CoreError::StayTooShort ──┐                  │  │
//! │  │         │                                    │                  │  │
//! │  │         ▼                                    ▼                  │  │
//! │  │  Race lost? ────── BookingError::Conflict ── ErrorResponse ────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  try { await reserve(...) } catch (e) {                                 │
//! │    // e.message = "another reservation claimed an overlapping date"     │
//! │    // e.code = "CONFLICT"                                               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failed mutation leaves the store unchanged; errors are typed
//! results, never panics crossing the crate boundary.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use homestay_core::{BookingId, BookingStatus, CoreError, PropertyId, ValidationError};

// =============================================================================
// Booking Error
// =============================================================================

/// Errors from the reservation store and service.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A range or pricing rule from the pure core failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Property id is not in the catalog.
    #[error("property {0} not found")]
    PropertyNotFound(PropertyId),

    /// Booking id is unknown to the store.
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    /// Guest count exceeds what the property sleeps.
    #[error("{guests} guests exceeds the property limit of {max_guests}")]
    CapacityExceeded { guests: u32, max_guests: u32 },

    /// The range was not free when the store went to commit it.
    ///
    /// The service retries once on this before surfacing
    /// [`BookingError::Conflict`].
    #[error("{date} is no longer available")]
    Unavailable { date: NaiveDate },

    /// Another reservation claimed an overlapping date between quote
    /// and commit, and the internal retry also lost.
    ///
    /// The caller must re-quote with fresh availability.
    #[error("another reservation claimed an overlapping date")]
    Conflict,

    /// Reserve was called without the payment-confirmed signal.
    #[error("payment has not been confirmed")]
    PaymentRequired,

    /// The booking is already cancelled or completed.
    #[error("booking {id} is already {status:?}")]
    AlreadyTerminal {
        id: BookingId,
        status: BookingStatus,
    },

    /// No cancellation once the stay has begun.
    #[error("booking {id} cannot be cancelled on or after check-in ({check_in})")]
    PastCheckIn {
        id: BookingId,
        check_in: NaiveDate,
    },
}

impl BookingError {
    /// The machine-readable code the presentation layer switches on.
    pub fn reason_code(&self) -> ReasonCode {
        match self {
            BookingError::Core(CoreError::PastDate) => ReasonCode::PastDate,
            BookingError::Core(CoreError::InvertedRange) => ReasonCode::InvertedRange,
            BookingError::Core(CoreError::DateBlocked { .. }) => ReasonCode::DateBlocked,
            BookingError::Core(CoreError::StayTooShort { .. }) => ReasonCode::StayTooShort,
            BookingError::Core(CoreError::StayTooLong { .. }) => ReasonCode::StayTooLong,
            BookingError::Core(CoreError::BeyondHorizon { .. }) => ReasonCode::BeyondHorizon,
            BookingError::Core(CoreError::ZeroNights) => ReasonCode::ZeroNights,
            BookingError::Core(CoreError::Validation(_)) => ReasonCode::ValidationError,
            BookingError::PropertyNotFound(_) => ReasonCode::PropertyNotFound,
            BookingError::BookingNotFound(_) => ReasonCode::BookingNotFound,
            BookingError::CapacityExceeded { .. } => ReasonCode::CapacityExceeded,
            BookingError::Unavailable { .. } => ReasonCode::Unavailable,
            BookingError::Conflict => ReasonCode::Conflict,
            BookingError::PaymentRequired => ReasonCode::PaymentRequired,
            BookingError::AlreadyTerminal { .. } => ReasonCode::AlreadyTerminal,
            BookingError::PastCheckIn { .. } => ReasonCode::PastCheckIn,
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Core(CoreError::Validation(err))
    }
}

// =============================================================================
// Reason Codes
// =============================================================================

/// Reason codes for presentation-layer error mapping.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await reserve(propertyId, checkIn, checkOut, details);
/// } catch (e) {
///   switch (e.code) {
///     case 'CONFLICT':
///       toast.error('Those dates were just taken - please pick again');
///       refreshAvailability();
///       break;
///     case 'STAY_TOO_SHORT':
///       showForm(e.message);
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    PastDate,
    InvertedRange,
    DateBlocked,
    StayTooShort,
    StayTooLong,
    BeyondHorizon,
    ZeroNights,
    ValidationError,
    PropertyNotFound,
    BookingNotFound,
    CapacityExceeded,
    Unavailable,
    Conflict,
    PaymentRequired,
    AlreadyTerminal,
    PastCheckIn,
}

// =============================================================================
// Serialized Error Response
// =============================================================================

/// What the frontend receives when an operation fails.
///
/// ```json
/// { "code": "CONFLICT", "message": "another reservation claimed an overlapping date" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable code for programmatic handling.
    pub code: ReasonCode,

    /// Human-readable message for display.
    pub message: String,
}

impl From<&BookingError> for ErrorResponse {
    fn from(err: &BookingError) -> Self {
        ErrorResponse {
            code: err.reason_code(),
            message: err.to_string(),
        }
    }
}

/// Result type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

// =============================================================================
// Unit Tests
// =============================================================================
