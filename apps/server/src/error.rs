//! # API Error Type
//!
//! Unified error type for services and HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in KidsPOS                                │
//! │                                                                         │
//! │  Handler ──► Service ──► Repository                                    │
//! │     ▲           │             │                                         │
//! │     │           │             └── DbError ──────────┐                  │
//! │     │           └── CoreError / ValidationError ────┤                  │
//! │     │                                               ▼                  │
//! │     │                                          ApiError                │
//! │     │                                     { code, message }            │
//! │     │                                               │                  │
//! │     └───────────────────────────────────────────────┘                  │
//! │                                                                         │
//! │  JSON API:  status from code, body {"error": message}                  │
//! │  Web pages: form re-rendered with message inline (400)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use kidspos_core::{CoreError, ValidationError};
use kidspos_db::DbError;

/// Error returned from services and handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Machine-readable category, decides the HTTP status
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Requested stock is not available (400)
    InsufficientStock,

    /// Resource not found (404)
    NotFound,

    /// Unique key taken, or row still referenced (409)
    Conflict,

    /// Request body over the configured limit (413)
    PayloadTooLarge,

    /// Endpoint exists but has no implementation (501)
    NotImplemented,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn not_implemented() -> Self {
        ApiError::new(ErrorCode::NotImplemented, "Not implemented")
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result alias used by services and handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Conversions
// =============================================================================

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let message = err.to_string();
        match err {
            DbError::NotFound { .. } => ApiError::not_found(message),
            DbError::UniqueViolation { .. } | DbError::Referenced { .. } => {
                ApiError::new(ErrorCode::Conflict, message)
            }
            DbError::StockConflict { .. } => ApiError::new(ErrorCode::InsufficientStock, message),
            DbError::ForeignKeyViolation { .. } => {
                tracing::warn!(error = %message, "Foreign key violation");
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => {
                tracing::error!(error = %message, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, message)
            }
        }
    }
}

/// Converts core errors to API errors.
///
/// Unknown references inside a request body are the caller's fault, so
/// they are 400 rather than 404.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::ItemNotFound(_)
            | CoreError::StoreNotFound(_)
            | CoreError::StaffNotFound(_)
            | CoreError::TotalOverflow
            | CoreError::Validation(_) => ApiError::validation(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!(error = %err, "I/O error");
        ApiError::internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::validation("Invalid ID")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::new(ErrorCode::PayloadTooLarge, err.body_text());
        }
        ApiError::validation(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::not_found("Item", 7).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Item not found: 7");

        let err: ApiError = DbError::duplicate("version", "1.0.0").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = DbError::Referenced {
            entity: "Store".to_string(),
            id: "1".to_string(),
            by: "sales".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = DbError::QueryFailed("boom".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::StoreNotFound(9).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = CoreError::InsufficientStock {
            item: "Juice".to_string(),
            available: 1,
            requested: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Juice"));
    }

    #[test]
    fn test_not_implemented() {
        assert_eq!(
            ApiError::not_implemented().status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }
}
