//! # Validation Module
//!
//! Input validation utilities for the market demo.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                   │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (lengths, ranges, required fields)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (user_id, product_id) on cart_items                        │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::validation::{validate_user_id, validate_quantity};
//!
//! assert_eq!(validate_user_id("  user123 ").unwrap(), "user123");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewOrder, NewProduct};
use crate::{MAX_ITEM_QUANTITY, MAX_TEXT_LEN, MAX_USER_ID_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user identifier and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// User ids are opaque: nothing checks them against a user table.
pub fn validate_user_id(user_id: &str) -> ValidationResult<String> {
    let user_id = user_id.trim();

    if user_id.is_empty() {
        return Err(ValidationError::Required {
            field: "user_id".to_string(),
        });
    }

    if user_id.chars().count() > MAX_USER_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "user_id".to_string(),
            max: MAX_USER_ID_LEN,
        });
    }

    Ok(user_id.to_string())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Normalizes an optional free-text field: blank becomes `None`.
pub fn normalize_optional_text(
    field: &str,
    value: Option<&str>,
) -> ValidationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if text.chars().count() > MAX_TEXT_LEN => Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        }),
        Some(text) => Ok(Some(text.to_string())),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level (>= 0).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an order total in cents (>= 0).
pub fn validate_total_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "total_amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates and normalizes a product before insertion.
pub fn validate_new_product(product: NewProduct) -> ValidationResult<NewProduct> {
    validate_product_name(&product.name)?;
    validate_price_cents(product.price_cents)?;
    validate_stock(product.stock)?;

    Ok(NewProduct {
        name: product.name.trim().to_string(),
        description: normalize_optional_text("description", product.description.as_deref())?,
        price_cents: product.price_cents,
        stock: product.stock,
        category: normalize_optional_text("category", product.category.as_deref())?,
        image_url: normalize_optional_text("image_url", product.image_url.as_deref())?,
    })
}

/// Validates and normalizes a manually recorded order.
pub fn validate_new_order(order: NewOrder) -> ValidationResult<NewOrder> {
    let user_id = validate_user_id(&order.user_id)?;
    validate_total_cents(order.total_cents)?;

    Ok(NewOrder { user_id, ..order })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;

    #[test]
    fn test_validate_user_id() {
        assert_eq!(validate_user_id("user123").unwrap(), "user123");
        assert_eq!(validate_user_id("  u1  ").unwrap(), "u1");

        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("   ").is_err());
        assert!(validate_user_id(&"u".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("DevOps Handbook").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock_and_totals() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(validate_total_cents(0).is_ok());
        assert!(validate_total_cents(-5).is_err());
    }

    #[test]
    fn test_normalize_optional_text() {
        assert_eq!(normalize_optional_text("category", None).unwrap(), None);
        assert_eq!(normalize_optional_text("category", Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_optional_text("category", Some(" Books ")).unwrap(),
            Some("Books".to_string())
        );
        assert!(normalize_optional_text("description", Some(&"x".repeat(2001))).is_err());
    }

    #[test]
    fn test_validate_new_product_normalizes() {
        let product = validate_new_product(NewProduct {
            name: "  Test Product ".to_string(),
            description: Some(String::new()),
            price_cents: 2999,
            stock: 10,
            category: Some("Electronics".to_string()),
            image_url: None,
        })
        .unwrap();

        assert_eq!(product.name, "Test Product");
        assert_eq!(product.description, None);
        assert_eq!(product.category.as_deref(), Some("Electronics"));
    }

    #[test]
    fn test_validate_new_product_rejects_negative_values() {
        let base = NewProduct {
            name: "Thing".to_string(),
            description: None,
            price_cents: 100,
            stock: 1,
            category: None,
            image_url: None,
        };
        assert!(validate_new_product(NewProduct {
            price_cents: -1,
            ..base.clone()
        })
        .is_err());
        assert!(validate_new_product(NewProduct { stock: -1, ..base }).is_err());
    }

    #[test]
    fn test_validate_new_order() {
        let order = validate_new_order(NewOrder {
            user_id: " user123 ".to_string(),
            total_cents: 5998,
            status: OrderStatus::Pending,
        })
        .unwrap();
        assert_eq!(order.user_id, "user123");

        assert!(validate_new_order(NewOrder {
            user_id: String::new(),
            total_cents: 1,
            status: OrderStatus::Pending,
        })
        .is_err());
    }
}
