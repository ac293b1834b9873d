//! # Error Types
//!
//! Domain-specific error types for market-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  market-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - Flat taxonomy the HTTP layer maps to status    │
//! │                                                                         │
//! │  market-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── WorkflowError    - CoreError | DbError from a transaction         │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError         - What the client sees (JSON)                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → WorkflowError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Flat classification of every failure the core can report.
///
/// The HTTP layer maps each kind to a status code; it never inspects
/// individual error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing or malformed input (caller error).
    Validation,
    /// Referenced product, cart row or order does not exist.
    NotFound,
    /// Requested quantity exceeds available stock.
    InsufficientStock,
    /// Purchase attempted with no cart lines.
    EmptyCart,
    /// Transaction or query failure.
    Storage,
    /// Market reset could not be applied.
    ResetFailed,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Cart row cannot be found.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(i64),

    /// Insufficient stock to satisfy a cart line.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Docker Deep Dive", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Client shows: "Insufficient stock for Docker Deep Dive: available 3, requested 5"
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Purchase attempted on an empty cart.
    #[error("Cart is empty for user {user_id}")]
    EmptyCart { user_id: String },

    /// An order total does not fit in the money representation.
    #[error("Order total overflows for user {user_id}")]
    AmountOverflow { user_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ProductNotFound(_) | CoreError::CartItemNotFound(_) => ErrorKind::NotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CoreError::EmptyCart { .. } => ErrorKind::EmptyCart,
            CoreError::AmountOverflow { .. } | CoreError::Validation(_) => ErrorKind::Validation,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
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

    /// Invalid format (e.g., unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
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
            product: "Docker Deep Dive".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Docker Deep Dive: available 3, requested 5"
        );

        let err = CoreError::EmptyCart {
            user_id: "u1".to_string(),
        };
        assert_eq!(err.to_string(), "Cart is empty for user u1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "user_id".to_string(),
        };
        assert_eq!(err.to_string(), "user_id is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CoreError::ProductNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::CartItemNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::EmptyCart {
                user_id: "u".into()
            }
            .kind(),
            ErrorKind::EmptyCart
        );
        let validation: CoreError = ValidationError::Required {
            field: "user_id".to_string(),
        }
        .into();
        assert!(matches!(validation, CoreError::Validation(_)));
        assert_eq!(validation.kind(), ErrorKind::Validation);
    }
}
