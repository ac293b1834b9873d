//! # Request and Response Bodies
//!
//! Amounts travel as JSON numbers with two decimals (`49.99`). Inside the
//! service they are integer cents; conversion happens only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use market_core::{
    CartItem, CartLine, Money, NewOrder, NewProduct, Order, OrderStatus, Product, PurchaseReceipt,
    ValidationError,
};

// =============================================================================
// Amount Input
// =============================================================================

/// A decimal amount given as a JSON number or a string.
///
/// Numbers are parsed from their textual form, so `29.99` becomes exactly
/// 2999 cents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    /// Parses into cents, reporting failures against `field`.
    pub fn to_money(&self, field: &str) -> Result<Money, ValidationError> {
        let text = match self {
            AmountInput::Number(number) => number.to_string(),
            AmountInput::Text(text) => text.clone(),
        };
        text.parse::<Money>().map_err(|err| match err {
            ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
                field: field.to_string(),
                reason,
            },
            other => other,
        })
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            price: p.price().to_major_f64(),
            name: p.name,
            description: p.description,
            stock: p.stock,
            category: p.category,
            image_url: p.image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: AmountInput,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> Result<NewProduct, ValidationError> {
        Ok(NewProduct {
            price_cents: self.price.to_money("price")?.cents(),
            name: self.name,
            description: self.description,
            stock: self.stock,
            category: self.category,
            image_url: self.image_url,
        })
    }
}

// =============================================================================
// Cart
// =============================================================================

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub user_id: String,
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartItemDto {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemDto {
    fn from(item: CartItem) -> Self {
        CartItemDto {
            id: item.id,
            user_id: item.user_id,
            product_id: item.product_id,
            quantity: item.quantity,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartLineDto {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    pub quantity: i64,
    pub product: ProductDto,
}

impl From<CartLine> for CartLineDto {
    fn from(line: CartLine) -> Self {
        CartLineDto {
            id: line.id,
            user_id: line.user_id,
            product_id: line.product_id,
            quantity: line.quantity,
            product: line.product.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i64,
    pub user_id: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        OrderDto {
            id: order.id,
            total_amount: order.total().to_major_f64(),
            user_id: order.user_id,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub total_amount: AmountInput,
    #[serde(default)]
    pub status: OrderStatus,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> Result<NewOrder, ValidationError> {
        Ok(NewOrder {
            total_cents: self.total_amount.to_money("total_amount")?.cents(),
            user_id: self.user_id,
            status: self.status,
        })
    }
}

// =============================================================================
// Purchase / Reset
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub order_id: i64,
    pub total_amount: f64,
}

impl From<PurchaseReceipt> for PurchaseResponse {
    fn from(receipt: PurchaseReceipt) -> Self {
        PurchaseResponse {
            order_id: receipt.order_id,
            total_amount: receipt.total.to_major_f64(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub products_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_from_number_is_exact() {
        let input: AmountInput = serde_json::from_str("29.99").unwrap();
        assert_eq!(input.to_money("price").unwrap().cents(), 2999);

        let input: AmountInput = serde_json::from_str("30").unwrap();
        assert_eq!(input.to_money("price").unwrap().cents(), 3000);
    }

    #[test]
    fn test_amount_from_string() {
        let input: AmountInput = serde_json::from_str("\"0.1\"").unwrap();
        assert_eq!(input.to_money("price").unwrap().cents(), 10);
    }

    #[test]
    fn test_amount_error_names_field() {
        let input: AmountInput = serde_json::from_str("1.999").unwrap();
        let err = input.to_money("total_amount").unwrap_err();
        assert!(err.to_string().starts_with("total_amount has invalid format"));
    }

    #[test]
    fn test_add_to_cart_default_quantity() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"user_id":"u1","product_id":3}"#).unwrap();
        assert_eq!(req.quantity, 1);
    }

    #[test]
    fn test_create_order_default_status() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"user_id":"u1","total_amount":59.98}"#).unwrap();
        let order = req.into_new_order().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents, 5998);
    }
}
