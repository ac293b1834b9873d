//! # Workflows
//!
//! Operations that validate input, apply business rules from market-core
//! and touch storage. Each multi-step mutation runs in one transaction.
//!
//! ## Transaction Shape
//! ```text
//! let mut tx = db.begin_write().await?;      BEGIN IMMEDIATE
//!     read   (&mut *tx)                      │
//!     plan   (market-core, pure)             │  any `?` here drops `tx`
//!     write  (&mut *tx)                      │  → ROLLBACK
//! tx.commit().await?;                        COMMIT
//! ```
//!
//! ## Modules
//! - [`purchase`] - Cart → order, stock decrement, cart clear
//! - [`reset`] - Clear orders, restock to baseline
//! - [`cart`] - Add to cart with merge, remove, view
//! - [`catalog`] - Product reads and creation
//! - [`ledger`] - Order reads and manual entry

pub mod cart;
pub mod catalog;
pub mod ledger;
pub mod purchase;
pub mod reset;

use thiserror::Error;

use crate::error::DbError;
use market_core::{CoreError, ErrorKind, ValidationError};

// =============================================================================
// Workflow Error
// =============================================================================

/// Failure of a workflow: a business rule said no, or storage broke.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Validation, not-found, stock or empty-cart rejection.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Query or transaction failure; the transaction was rolled back.
    #[error(transparent)]
    Storage(#[from] DbError),

    /// Market reset could not be applied; nothing was changed.
    #[error("Market reset failed: {0}")]
    ResetFailed(#[source] DbError),
}

impl WorkflowError {
    /// Returns the taxonomy bucket the HTTP layer maps to a status code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Domain(err) => err.kind(),
            WorkflowError::Storage(_) => ErrorKind::Storage,
            WorkflowError::ResetFailed(_) => ErrorKind::ResetFailed,
        }
    }
}

impl From<ValidationError> for WorkflowError {
    fn from(err: ValidationError) -> Self {
        WorkflowError::Domain(CoreError::Validation(err))
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err: WorkflowError = CoreError::EmptyCart {
            user_id: "u1".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::EmptyCart);

        let err: WorkflowError = DbError::PoolExhausted.into();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err = WorkflowError::ResetFailed(DbError::PoolExhausted);
        assert_eq!(err.kind(), ErrorKind::ResetFailed);
        assert_eq!(err.to_string(), "Market reset failed: Connection pool exhausted");

        let err: WorkflowError = ValidationError::Required {
            field: "user_id".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Validation error: user_id is required");
    }
}
