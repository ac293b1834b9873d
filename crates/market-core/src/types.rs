//! # Domain Types
//!
//! Core domain types used throughout the market demo.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  product_id     │   │  id (i64)       │       │
//! │  │  name           │   │  user_id        │   │  user_id        │       │
//! │  │  price_cents    │   │  quantity       │   │  total_cents    │       │
//! │  │  stock          │   └─────────────────┘   │  status         │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  Orders carry no link to cart rows: the total is a snapshot taken at   │
//! │  purchase time, and the cart rows are gone afterwards.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identities are integers assigned by the database on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Database-generated identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently available.
    pub stock: i64,

    /// Optional category label (e.g. "Books").
    pub category: Option<String>,

    /// Optional image location for the storefront.
    pub image_url: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if the requested quantity can be covered by current stock.
    #[inline]
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Input for creating a product. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// One cart line: a user's request to buy `quantity` units of one product.
///
/// At most one row exists per (user_id, product_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CartItem {
    pub id: i64,
    /// External user identifier; not validated against any user table.
    pub user_id: String,
    pub product_id: i64,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with its product, as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    pub quantity: i64,
    pub product: Product,
}

impl CartLine {
    /// Price × quantity for this line, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.product.price().checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Recorded but not fulfilled (manual order entry).
    Pending,
    /// Created by a successful purchase.
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl OrderStatus {
    /// Lowercase wire/storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["pending".to_string(), "completed".to_string()],
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A ledger entry. Immutable after creation; removed only by market reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    /// Snapshot of Σ price × quantity at purchase time, in cents.
    pub total_cents: i64,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Input for recording an order directly (outside the purchase workflow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub user_id: String,
    pub total_cents: i64,
    pub status: OrderStatus,
}

// =============================================================================
// Workflow Results
// =============================================================================

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseReceipt {
    pub order_id: i64,
    pub total: Money,
}

/// Outcome of a market reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResetSummary {
    /// Number of products whose stock was restored.
    pub products_count: u64,
    /// Number of orders removed from the ledger.
    pub orders_deleted: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, stock: i64) -> Product {
        Product {
            id: 1,
            name: "Docker Deep Dive".to_string(),
            description: None,
            price_cents,
            stock,
            category: Some("Books".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_product_can_supply() {
        let p = product(3999, 5);
        assert!(p.can_supply(5));
        assert!(!p.can_supply(6));
        assert_eq!(p.price().cents(), 3999);
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("completed".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!(" Pending ".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_order_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_cart_line_total() {
        let line = CartLine {
            id: 1,
            user_id: "u1".to_string(),
            product_id: 1,
            quantity: 3,
            product: product(1000, 5),
        };
        assert_eq!(line.line_total(), Some(Money::from_cents(3000)));
    }
}
