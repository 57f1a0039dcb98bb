//! # Session Error Type
//!
//! Unified user-facing error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in LocaKit                                │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  addToCart(productId, qty)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session Operation                                               │  │
//! │  │  Result<CartView, SessionError>                                  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CoreError::InsufficientStock ──► SessionError ─────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.message = "Insufficient stock for GEN-7500: ..."                │
//! │    // e.code = "INSUFFICIENT_STOCK"                                     │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use loca_core::CoreError;

/// User-facing error returned from session operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "TIER_NOT_FOUND",
///   "message": "No rate tier for product prod-1 at 6 months"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await addToQuote(productId, qty, months);
/// } catch (e) {
///   switch (e.code) {
///     case 'TIER_NOT_FOUND':
///       promptDurationChoice(e.message);
///       break;
///     case 'INSUFFICIENT_STOCK':
///       showStockNotice(e.message);
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or line not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Requested quantity exceeds the stock snapshot
    InsufficientStock,

    /// Referenced rental duration has no configured price tier
    TierNotFound,

    /// Container rule violation (wrong product kind, duration rules, caps)
    SelectionError,

    /// The request-capture collaborator refused or failed
    SubmissionFailed,

    /// Internal error (500)
    Internal,
}

impl SessionError {
    /// Creates a new session error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        SessionError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        SessionError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a submission error.
    pub fn submission(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::SubmissionFailed, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::Internal, message)
    }
}

/// Converts engine errors to session errors.
///
/// The message is the engine's own (already context-rich); the code is what
/// the frontend branches on.
impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_) | CoreError::LineNotFound { .. } => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::TierNotFound { .. } => ErrorCode::TierNotFound,
            CoreError::InvalidQuantity { .. } | CoreError::QuantityTooLarge { .. } => {
                ErrorCode::ValidationError
            }
            CoreError::DurationRequired { .. }
            | CoreError::DurationNotAllowed { .. }
            | CoreError::ProductKindMismatch { .. }
            | CoreError::SelectionTooLarge { .. } => ErrorCode::SelectionError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        SessionError::new(code, err.to_string())
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use loca_core::{ProductKind, RentalDuration};

    #[test]
    fn test_core_error_mapping() {
        let err: SessionError = CoreError::InsufficientStock {
            sku: "GEN-7500".to_string(),
            available: 3,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("GEN-7500"));

        let err: SessionError = CoreError::TierNotFound {
            product_id: "p-1".to_string(),
            duration: RentalDuration::SixMonths,
        }
        .into();
        assert_eq!(err.code, ErrorCode::TierNotFound);

        let err: SessionError = CoreError::ProductKindMismatch {
            product_id: "p-1".to_string(),
            expected: ProductKind::Sale,
            actual: ProductKind::Rental,
        }
        .into();
        assert_eq!(err.code, ErrorCode::SelectionError);
    }

    #[test]
    fn test_serializes_with_screaming_code() {
        let err = SessionError::not_found("Product", "p-1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: p-1");
    }
}
