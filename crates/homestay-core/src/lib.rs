//! # homestay-core: Pure Business Logic for Homestay Hub
//!
//! This crate is the **heart** of Homestay Hub. It contains all booking
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Homestay Hub Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │   Calendar UI ──► Booking Form ──► Payment ──► Dashboards      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              homestay-booking (Stateful Layer)                  │   │
//! │  │    ReservationStore, ReservationService, catalog/notify ports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ homestay-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌──────────┐           │   │
//! │  │  │  types   │ │availabil.│ │ pricing │ │ classify │           │   │
//! │  │  │ Property │ │ validate │ │ tiers + │ │ buckets  │           │   │
//! │  │  │ Booking  │ │  range   │ │   tax   │ │          │           │   │
//! │  │  └──────────┘ └──────────┘ └─────────┘ └──────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO DATABASE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Property, Booking, DateRange, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`availability`] - Per-date selectability and range validation
//! - [`selection`] - Two-click calendar selection state machine
//! - [`pricing`] - Nightly subtotal, tiered discounts, tax, total
//! - [`classify`] - Lifecycle bucket derivation (upcoming/current/past)
//! - [`validation`] - Guest input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No Clock**: "today" is always an explicit argument, never read internally
//! 3. **Integer Money**: All monetary values are in sen (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use homestay_core::money::{Money, Percentage};
//! use homestay_core::pricing::compute_total;
//!
//! // 7 nights at RM100.00/night, 10% weekly discount, 6% tax
//! let breakdown = compute_total(
//!     7,
//!     Money::from_sen(10_000),
//!     Percentage::from_percent(10),
//!     Percentage::from_percent(20),
//!     Percentage::from_bps(600),
//! )
//! .unwrap();
//!
//! assert_eq!(breakdown.subtotal_sen, 63_000); // RM630.00
//! assert_eq!(breakdown.taxes_sen, 3_780);     // RM37.80
//! assert_eq!(breakdown.total_sen, 66_780);    // RM667.80
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod classify;
pub mod error;
pub mod money;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use homestay_core::Money` instead of
// `use homestay_core::money::Money`

pub use classify::Bucket;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percentage};
pub use selection::DateSelection;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points (600 = 6%).
///
/// ## Business Reason
/// Malaysian service tax on short-term accommodation. Exposed as a
/// default rather than hard-coded so the booking layer can override
/// it per deployment.
pub const DEFAULT_TAX_RATE_BPS: u32 = 600;

/// Nights at which the weekly discount tier begins.
pub const WEEKLY_TIER_NIGHTS: i64 = 7;

/// Nights at which the monthly discount tier begins.
pub const MONTHLY_TIER_NIGHTS: i64 = 28;

/// Maximum length of the free-text special requests field.
///
/// ## Business Reason
/// Keeps guest messages to a size the owner dashboard can display
/// without truncation games.
pub const MAX_SPECIAL_REQUESTS_LEN: usize = 500;
