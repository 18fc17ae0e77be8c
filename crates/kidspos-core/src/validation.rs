//! # Validation Module
//!
//! Input validation rules for KidsPOS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Handler (Axum)                                               │
//! │  ├── Type validation (JSON / form deserialization)                     │
//! │  └── 400 on malformed bodies                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service                                                      │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kidspos_core::validation::{validate_name, validate_quantity};
//!
//! validate_name("name", "Juice").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{ItemInput, SettingInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted external code (item / store / staff barcode).
pub const MAX_CODE_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required text field is not blank.
///
/// ## Example
/// ```rust
/// use kidspos_core::validation::validate_name;
///
/// assert!(validate_name("name", "Juice").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a caller-supplied external code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, numbers, hyphens, underscores
pub fn validate_code(field: &str, code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::required(field));
    }

    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates an absolute stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates a sale line quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates an item create / update payload.
pub fn validate_item(input: &ItemInput) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_price(input.price)?;
    validate_stock(input.stock)?;
    if let Some(code) = input.item_id.as_deref().filter(|c| !c.trim().is_empty()) {
        validate_code("itemId", code)?;
    }
    Ok(())
}

/// Validates a key / value pair for a setting.
pub fn validate_setting_pair(key: &str, value: &str) -> ValidationResult<()> {
    validate_name("key", key)?;
    validate_name("value", value)?;
    Ok(())
}

/// Validates a setting create payload.
pub fn validate_setting(input: &SettingInput) -> ValidationResult<()> {
    validate_setting_pair(&input.key, &input.value)
}

// =============================================================================
// Unit Tests
// =============================================================================
