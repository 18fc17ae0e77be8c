//! # Error Types
//!
//! Domain-specific error types for kidspos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kidspos-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kidspos-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  server errors (in app)                                                │
//! │  └── ApiError         - What HTTP clients see ({"error": "..."})       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Response               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Raised while planning a sale. All of them are detected before anything
/// is written to the database.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale line references an item that does not exist or was deleted.
    #[error("item not found: {0}")]
    ItemNotFound(i64),

    /// The sale references a store id with no matching row.
    #[error("store not found: {0}")]
    StoreNotFound(i64),

    /// The sale references a staff id with no matching row.
    #[error("staff not found: {0}")]
    StaffNotFound(i64),

    /// Insufficient stock to complete sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Sale line (item: Juice, qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { item: "Juice", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Form shows: "insufficient stock for item: Juice"
    /// ```
    #[error("insufficient stock for item: {item} (available {available}, requested {requested})")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// Price × quantity (or the running total) does not fit in an i64.
    #[error("sale total is too large")]
    TotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be below zero.
    #[error("{field} must be non-negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. wrong file extension, bad characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Uploaded file exceeds the configured size limit.
    #[error("file size exceeds maximum of {max_bytes} bytes")]
    FileTooLarge { max_bytes: u64 },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
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
            item: "Juice".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for item: Juice (available 3, requested 5)"
        );
        assert_eq!(CoreError::ItemNotFound(42).to_string(), "item not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be non-negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("store").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "store is required");
    }
}
