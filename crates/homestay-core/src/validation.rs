//! # Validation Module
//!
//! Guest input validation for reservation requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, shape)                                │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Authoritative field rules                                         │
//! │  └── Runs before any store mutation                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reservation store                                            │
//! │  └── Date/capacity invariants under the property lock                  │
//! │                                                                         │
//! │  Defense in depth: each layer catches different mistakes               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::GuestDetails;
use crate::MAX_SPECIAL_REQUESTS_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a guest name field (first or last).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must look like `local@domain.tld` (one `@`, a dot after it,
///   no whitespace) - the same shallow check the booking form does;
///   real verification is the mail system's job
///
/// ## Example
/// ```rust
/// use homestay_core::validation::validate_email;
///
/// assert!(validate_email("siti@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let malformed = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must be a valid email address".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(malformed());
    }

    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(malformed());
    }

    // Require a dot somewhere inside the domain, not at either edge.
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(malformed()),
    }
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 30 characters
/// - Digits, spaces, and `+ - ( )` only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 30,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    Ok(())
}

/// Validates the guest count against zero; the property's capacity
/// limit is the booking layer's job since it needs the catalog.
pub fn validate_guest_count(guests: u32) -> ValidationResult<()> {
    if guests == 0 {
        return Err(ValidationError::MustBePositive {
            field: "guests".to_string(),
        });
    }

    Ok(())
}

/// Validates the optional special-requests text.
pub fn validate_special_requests(requests: Option<&str>) -> ValidationResult<()> {
    if let Some(text) = requests {
        if text.len() > MAX_SPECIAL_REQUESTS_LEN {
            return Err(ValidationError::TooLong {
                field: "special_requests".to_string(),
                max: MAX_SPECIAL_REQUESTS_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Aggregate Validator
// =============================================================================

/// Validates a full guest-details form, first failure wins.
///
/// Field order matches the booking form so the guest sees errors in
/// reading order.
pub fn validate_guest_details(details: &GuestDetails) -> ValidationResult<()> {
    validate_name("first_name", &details.first_name)?;
    validate_name("last_name", &details.last_name)?;
    validate_email(&details.email)?;
    validate_phone(&details.phone)?;
    validate_guest_count(details.guests)?;
    validate_special_requests(details.special_requests.as_deref())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    fn valid_details() -> GuestDetails {
        GuestDetails {
            first_name: "Siti".to_string(),
            last_name: "Aminah".to_string(),
            email: "siti@example.com".to_string(),
            phone: "+60 12-345 6789".to_string(),
            guests: 2,
            payment_method: PaymentMethod::BayarCash,
            special_requests: None,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("first_name", "Siti").is_ok());
        assert!(validate_name("first_name", "").is_err());
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("first_name", &"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("siti@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("siti@").is_err());
        assert!(validate_email("siti@nodot").is_err());
        assert!(validate_email("siti@example.").is_err());
        assert!(validate_email("si ti@example.com").is_err());
        assert!(validate_email("siti@@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+60123456789").is_ok());
        assert!(validate_phone("+60 12-345 6789").is_ok());
        assert!(validate_phone("(03) 1234 5678").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone(&"1".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_guest_count() {
        assert!(validate_guest_count(1).is_ok());
        assert!(validate_guest_count(6).is_ok());
        assert!(validate_guest_count(0).is_err());
    }

    #[test]
    fn test_validate_special_requests() {
        assert!(validate_special_requests(None).is_ok());
        assert!(validate_special_requests(Some("Late check-in please")).is_ok());
        assert!(validate_special_requests(Some(&"x".repeat(600))).is_err());
    }

    #[test]
    fn test_validate_guest_details() {
        assert!(validate_guest_details(&valid_details()).is_ok());

        let mut bad = valid_details();
        bad.email = "bad".to_string();
        assert!(validate_guest_details(&bad).is_err());

        let mut bad = valid_details();
        bad.guests = 0;
        assert!(validate_guest_details(&bad).is_err());
    }
}
