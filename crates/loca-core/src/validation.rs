//! # Validation Module
//!
//! Input validation for quantities, fees, identifiers and contact fields.
//!
//! ## Usage
//! ```rust
//! use loca_core::validation::{parse_quantity, validate_fee};
//!
//! // Loosely-typed quantity from a form field
//! assert_eq!(parse_quantity(3.0).unwrap(), 3);
//! assert!(parse_quantity(2.5).is_err()); // rejected, never floored
//!
//! // Admin tier input
//! assert!(validate_fee("monthly fee", 450.0).is_ok());
//! assert!(validate_fee("monthly fee", -1.0).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Validators
// =============================================================================

/// Parses a loosely-typed quantity coming from a form field or API payload.
///
/// ## Rules
/// - Must be a whole number: fractional input is rejected, not floored or
///   rounded, so nothing the customer typed is silently lost
/// - Must be positive (> 0)
pub fn parse_quantity(raw: f64) -> CoreResult<i64> {
    if !raw.is_finite() || raw.fract() != 0.0 || raw <= 0.0 {
        return Err(CoreError::InvalidQuantity { requested: raw });
    }
    Ok(raw as i64)
}

/// Validates an already-integral quantity for a mutation expecting one.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity {
            requested: qty as f64,
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: qty,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Monetary Validators
// =============================================================================

/// Validates an administrator-supplied fee or contribution amount.
///
/// ## Rules
/// - Must be finite (NaN and infinities are malformed input)
/// - Must be non-negative; zero is allowed (e.g. no upfront contribution)
pub fn validate_fee(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite amount".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a product identifier (UUID v4 string).
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "product id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Contact Validators
// =============================================================================

/// Validates the contact name attached to a quote or order request.
pub fn validate_contact_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a contact email address.
///
/// Deliberately shallow: deliverability is the request-capture collaborator's
/// problem, this only catches obviously malformed input early.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_whole_numbers() {
        assert_eq!(parse_quantity(1.0).unwrap(), 1);
        assert_eq!(parse_quantity(42.0).unwrap(), 42);
    }

    #[test]
    fn test_parse_quantity_rejects_fractional() {
        assert!(matches!(
            parse_quantity(2.5),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(parse_quantity(0.1).is_err());
    }

    #[test]
    fn test_parse_quantity_rejects_non_positive_and_non_finite() {
        assert!(parse_quantity(0.0).is_err());
        assert!(parse_quantity(-3.0).is_err());
        assert!(parse_quantity(f64::NAN).is_err());
        assert!(parse_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(matches!(
            validate_quantity(1000),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_fee() {
        assert!(validate_fee("monthly fee", 0.0).is_ok());
        assert!(validate_fee("monthly fee", 450.0).is_ok());

        assert!(matches!(
            validate_fee("monthly fee", -0.01),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(validate_fee("monthly fee", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("client@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("client@").is_err());
    }

    #[test]
    fn test_validate_contact_name() {
        assert!(validate_contact_name("Marie Dupont").is_ok());
        assert!(validate_contact_name("   ").is_err());
        assert!(validate_contact_name(&"A".repeat(300)).is_err());
    }
}
