//! # Error Types
//!
//! Domain-specific error types for loca-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  loca-core errors (this file)                                          │
//! │  ├── CoreError        - Pricing/selection rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  loca-session errors (separate crate)                                  │
//! │  └── SessionError     - What the storefront frontend sees              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Frontend           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, product id, duration, etc.)
//! 3. Errors are enum variants, never String
//! 4. A failed mutation leaves its container untouched; the caller decides
//!    what to show the user. Nothing is clamped, floored, or defaulted.

use thiserror::Error;

use crate::types::{ProductKind, RentalDuration};

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and selection errors.
///
/// These errors represent business rule violations in the pricing/quoting
/// engine. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be resolved against the caller-supplied catalog
    /// snapshot.
    ///
    /// ## When This Occurs
    /// - A selection line references a product removed from the catalog
    /// - The caller handed in a partial snapshot
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested or resulting quantity exceeds available stock.
    ///
    /// ## When This Occurs
    /// - A single add larger than the stock snapshot
    /// - Repeated small adds whose *resulting* total would exceed stock
    ///
    /// ## User Workflow
    /// ```text
    /// Add to cart (qty: 3, already holding 3)
    ///      │
    ///      ▼
    /// Stock snapshot: available = 5, resulting = 6
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "GEN-7500", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Only 5 GEN-7500 in stock"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Quantity is negative or not a whole number.
    ///
    /// Fractional input is rejected, never floored or rounded; silently
    /// truncating a quantity would lose what the customer typed.
    #[error("Invalid quantity {requested}: must be a positive whole number")]
    InvalidQuantity { requested: f64 },

    /// A rental line was added without choosing a contract duration.
    #[error("Product {product_id} is a rental item: a contract duration is required")]
    DurationRequired { product_id: String },

    /// A duration was supplied for a product that is not rented.
    #[error("Product {product_id} is sold outright: a contract duration does not apply")]
    DurationNotAllowed { product_id: String },

    /// Attempt to put a product into the wrong selection container.
    #[error("Product {product_id} is a {actual:?} item and cannot join a {expected:?} selection")]
    ProductKindMismatch {
        product_id: String,
        expected: ProductKind,
        actual: ProductKind,
    },

    /// The referenced rental duration has no configured price tier.
    ///
    /// Surfaces both at admission time (adding a line with an unpriced
    /// duration) and lazily at total-computation time (the tier was removed
    /// after the line was created).
    #[error("No rate tier for product {product_id} at {duration}")]
    TierNotFound {
        product_id: String,
        duration: RentalDuration,
    },

    /// Mutation addressed a line that is not in the container.
    #[error("Product {product_id} is not in the selection")]
    LineNotFound { product_id: String },

    /// Selection has exceeded the maximum number of unique lines.
    #[error("Selection cannot have more than {max} lines")]
    SelectionTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when administrator or customer input doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Monetary value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, malformed email, NaN amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "GEN-7500".to_string(),
            available: 5,
            requested: 6,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for GEN-7500: available 5, requested 6"
        );

        let err = CoreError::TierNotFound {
            product_id: "p-1".to_string(),
            duration: RentalDuration::SixMonths,
        };
        assert_eq!(err.to_string(), "No rate tier for product p-1 at 6 months");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBeNonNegative {
            field: "monthly fee".to_string(),
        };
        assert_eq!(err.to_string(), "monthly fee must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
