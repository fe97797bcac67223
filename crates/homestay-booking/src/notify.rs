//! # Notification Port
//!
//! Booking confirmations and cancellations trigger outbound messages
//! (WhatsApp/email). Delivery is fire-and-forget: the dispatcher is
//! invoked after the store has committed, and a delivery failure
//! never rolls back a reservation. Implementations own their error
//! handling; the trait methods are infallible.

use tracing::info;

use homestay_core::Booking;

/// Outbound notification seam.
///
/// Called synchronously after commit with no locks held, so an
/// implementation may hand off to a queue or spawn delivery work.
pub trait NotificationDispatcher: Send + Sync {
    /// A reservation was committed.
    fn booking_confirmed(&self, booking: &Booking);

    /// A booking was cancelled and its dates released.
    fn booking_cancelled(&self, booking: &Booking);
}

// =============================================================================
// Log Notifier
// =============================================================================

/// Default dispatcher: writes the event to the structured log.
///
/// Useful in tests and as a safe default until a real channel
/// (WhatsApp gateway, SMTP) is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationDispatcher for LogNotifier {
    fn booking_confirmed(&self, booking: &Booking) {
        info!(
            booking_id = booking.id,
            property = %booking.property_name,
            guest = %booking.guest_name,
            check_in = %booking.check_in,
            total = %booking.total(),
            "booking confirmed"
        );
    }

    fn booking_cancelled(&self, booking: &Booking) {
        info!(
            booking_id = booking.id,
            property = %booking.property_name,
            guest = %booking.guest_name,
            "booking cancelled"
        );
    }
}
