//! # Error Types
//!
//! Domain-specific error types for homestay-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  homestay-core errors (this file)                                      │
//! │  ├── CoreError        - Range/pricing rule violations                  │
//! │  └── ValidationError  - Guest input validation failures                │
//! │                                                                         │
//! │  homestay-booking errors (separate crate)                              │
//! │  └── BookingError     - Store/service failures + reason codes          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BookingError → Frontend           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (dates, limits, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing reason code

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent booking rule violations. They are always
/// recoverable by the caller: either re-prompt the guest (validation)
/// or re-quote with fresh availability (blocked dates).
#[derive(Debug, Error)]
pub enum CoreError {
    /// One of the range endpoints is before today.
    #[error("dates in the past cannot be booked")]
    PastDate,

    /// Check-out is on or before check-in.
    #[error("check-out must be after check-in")]
    InvertedRange,

    /// A night within the requested stay is already booked or blocked.
    ///
    /// ## When This Occurs
    /// - The guest picked a range spanning an existing booking
    /// - The availability snapshot went stale between render and submit
    #[error("{date} is not available")]
    DateBlocked { date: NaiveDate },

    /// The stay is shorter than the property's minimum.
    #[error("stay of {nights} nights is below the minimum of {min}")]
    StayTooShort { nights: i64, min: u32 },

    /// The stay is longer than the property's maximum.
    #[error("stay of {nights} nights exceeds the maximum of {max}")]
    StayTooLong { nights: i64, max: u32 },

    /// Check-in is further out than the property accepts bookings.
    #[error("check-in is more than {horizon_days} days ahead")]
    BeyondHorizon { horizon_days: u32 },

    /// A pricing request for zero (or negative) nights.
    ///
    /// Callers must validate the range first; this failing fast means
    /// a caller skipped [`crate::availability::validate_range`].
    #[error("a priced stay must be at least one night")]
    ZeroNights,

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Guest input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used for early validation before any booking logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
