//! # API Error Type
//!
//! Turns workflow failures into JSON responses.
//!
//! ## Response Shape
//! ```json
//! { "error": "Insufficient stock for Docker Deep Dive: available 3, requested 5",
//!   "code": "INSUFFICIENT_STOCK" }
//! ```
//!
//! ## Status Mapping
//! ```text
//! ErrorKind::Validation         → 400
//! ErrorKind::NotFound           → 404
//! ErrorKind::InsufficientStock  → 400
//! ErrorKind::EmptyCart          → 400
//! ErrorKind::Storage            → 500
//! ErrorKind::ResetFailed        → 500
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use market_core::{ErrorKind, ValidationError};
use market_db::{DbError, WorkflowError};

/// Error returned from HTTP handlers.
#[derive(Debug)]
pub struct ApiError {
    /// Taxonomy bucket, decides the status code
    pub kind: ErrorKind,

    /// Human-readable message
    pub message: String,
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: ErrorKind,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

/// Status code per error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InsufficientStock | ErrorKind::EmptyCart => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Storage | ErrorKind::ResetFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Constraint failures get a fixed message; the driver text stays in the log.
fn storage_message(err: &DbError) -> String {
    match err {
        DbError::UniqueViolation { .. } => "Record already exists".to_string(),
        DbError::ForeignKeyViolation { .. } => "Invalid reference".to_string(),
        DbError::CheckViolation { .. } => "Value violates a storage constraint".to_string(),
        DbError::PoolExhausted => "Database is busy, try again".to_string(),
        other => other.to_string(),
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let kind = err.kind();
        let message = match &err {
            WorkflowError::Domain(core) => core.to_string(),
            WorkflowError::Storage(db) => {
                tracing::error!(error = %db, "Storage failure");
                storage_message(db)
            }
            WorkflowError::ResetFailed(db) => {
                format!("Market reset failed: {}", storage_message(db))
            }
        };
        ApiError::new(kind, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorKind::Validation, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, code = ?self.kind, message = %self.message, "Request failed");
        }

        let body = ErrorBody {
            error: self.message,
            code: self.kind,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::CoreError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::InsufficientStock), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::EmptyCart), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Storage), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(ErrorKind::ResetFailed), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_message_passes_through() {
        let err: ApiError = WorkflowError::from(CoreError::ProductNotFound(9)).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found: 9");
    }

    #[test]
    fn test_constraint_text_is_not_leaked() {
        let err: ApiError = WorkflowError::from(DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Invalid reference");
    }
}
