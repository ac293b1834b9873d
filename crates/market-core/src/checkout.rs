//! # Checkout Planning
//!
//! Pure decision logic for the two stock-sensitive cart operations.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  market-db (transaction open)          market-core (this module)        │
//! │                                                                         │
//! │  load cart lines + products ─────────► plan_purchase()                  │
//! │                                          │                              │
//! │                                          ├── no lines?   → EmptyCart    │
//! │                                          ├── any short?  → Insufficient │
//! │                                          └── Σ price×qty → PurchasePlan │
//! │                                                             │           │
//! │  insert order, decrement stock, ◄───────────────────────────┘           │
//! │  delete cart rows, COMMIT                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every line is checked before the plan is returned, so a failing cart
//! never reaches the write phase.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product};

// =============================================================================
// Purchase Plan
// =============================================================================

/// Stock to remove from one product when the purchase commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: i64,
    pub quantity: i64,
}

/// Everything the write phase of a purchase needs, computed up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasePlan {
    pub user_id: String,
    /// Exact Σ price × quantity across all lines.
    pub total: Money,
    /// One entry per distinct product, in product id order.
    pub decrements: Vec<StockDecrement>,
    /// Cart rows to delete, in retrieval order.
    pub cart_item_ids: Vec<i64>,
}

/// Validates a user's cart against current stock and computes the order total.
///
/// ## Arguments
/// * `user_id` - Owner of the cart
/// * `lines` - Each cart row paired with the product it references, in
///   retrieval order
///
/// ## Errors
/// * `CoreError::EmptyCart` - `lines` is empty
/// * `CoreError::InsufficientStock` - the first line (in retrieval order)
///   whose product cannot cover the requested quantity
/// * `CoreError::AmountOverflow` - the total does not fit in i64 cents
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use market_core::checkout::plan_purchase;
/// use market_core::{CartItem, Product};
///
/// let product = Product {
///     id: 1, name: "Book".into(), description: None,
///     price_cents: 1000, stock: 5, category: None, image_url: None,
/// };
/// let item = CartItem {
///     id: 10, user_id: "u1".into(), product_id: 1, quantity: 3,
///     created_at: Utc::now(),
/// };
///
/// let plan = plan_purchase("u1", &[(item, product)]).unwrap();
/// assert_eq!(plan.total.cents(), 3000);
/// assert_eq!(plan.decrements[0].quantity, 3);
/// ```
pub fn plan_purchase(user_id: &str, lines: &[(CartItem, Product)]) -> CoreResult<PurchasePlan> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart {
            user_id: user_id.to_string(),
        });
    }

    // Rows are unique per product, but fold anyway so a duplicate can never
    // slip past the stock check with two half-sized requests.
    let mut requested: BTreeMap<i64, i64> = BTreeMap::new();
    for (item, product) in lines {
        let wanted = requested.entry(product.id).or_insert(0);
        *wanted += item.quantity;

        if !product.can_supply(*wanted) {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: *wanted,
            });
        }
    }

    let overflow = || CoreError::AmountOverflow {
        user_id: user_id.to_string(),
    };
    let mut total = Money::zero();
    for (item, product) in lines {
        let line_total = product
            .price()
            .checked_mul_quantity(item.quantity)
            .ok_or_else(overflow)?;
        total = total.checked_add(line_total).ok_or_else(overflow)?;
    }

    Ok(PurchasePlan {
        user_id: user_id.to_string(),
        total,
        decrements: requested
            .into_iter()
            .map(|(product_id, quantity)| StockDecrement {
                product_id,
                quantity,
            })
            .collect(),
        cart_item_ids: lines.iter().map(|(item, _)| item.id).collect(),
    })
}

// =============================================================================
// Cart Addition
// =============================================================================

/// Decides the quantity a cart row should hold after adding `added` units.
///
/// ## Behavior
/// ```text
/// existing = None      → new row with `added`
/// existing = Some(q)   → same row with q + added
///
/// result > product.stock → InsufficientStock (requested = combined quantity)
/// ```
///
/// The check is advisory: nothing is reserved, so the purchase re-checks.
pub fn plan_cart_addition(
    product: &Product,
    existing_quantity: Option<i64>,
    added: i64,
) -> CoreResult<i64> {
    let combined = existing_quantity.unwrap_or(0).saturating_add(added);

    if !product.can_supply(combined) {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.stock,
            requested: combined,
        });
    }

    Ok(combined)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, price_cents: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: None,
            price_cents,
            stock,
            category: None,
            image_url: None,
        }
    }

    fn item(id: i64, product_id: i64, quantity: i64) -> CartItem {
        CartItem {
            id,
            user_id: "u1".to_string(),
            product_id,
            quantity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = plan_purchase("u1", &[]).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart { ref user_id } if user_id == "u1"));
    }

    #[test]
    fn test_single_line_plan() {
        let plan = plan_purchase("u1", &[(item(1, 1, 3), product(1, 1000, 5))]).unwrap();

        assert_eq!(plan.total, Money::from_cents(3000));
        assert_eq!(
            plan.decrements,
            vec![StockDecrement {
                product_id: 1,
                quantity: 3
            }]
        );
        assert_eq!(plan.cart_item_ids, vec![1]);
    }

    #[test]
    fn test_total_is_exact_sum() {
        let lines = vec![
            (item(1, 1, 3), product(1, 1999, 10)),
            (item(2, 2, 7), product(2, 10, 10)),
            (item(3, 3, 1), product(3, 4999, 1)),
        ];
        let plan = plan_purchase("u1", &lines).unwrap();
        assert_eq!(plan.total.cents(), 3 * 1999 + 7 * 10 + 4999);
        assert_eq!(plan.cart_item_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_any_short_line_fails_whole_cart() {
        let lines = vec![
            (item(1, 1, 2), product(1, 1000, 5)),
            (item(2, 2, 4), product(2, 500, 3)),
        ];
        let err = plan_purchase("u1", &lines).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Product 2");
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exact_stock_is_enough() {
        assert!(plan_purchase("u1", &[(item(1, 1, 5), product(1, 100, 5))]).is_ok());
    }

    #[test]
    fn test_duplicate_product_lines_are_combined() {
        let p = product(1, 100, 5);
        let lines = vec![(item(1, 1, 3), p.clone()), (item(2, 1, 3), p)];
        let err = plan_purchase("u1", &lines).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { requested: 6, .. }));
    }

    #[test]
    fn test_total_overflow() {
        let lines = vec![(item(1, 1, 2), product(1, i64::MAX, 5))];
        let err = plan_purchase("u1", &lines).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[test]
    fn test_cart_addition_new_row() {
        assert_eq!(plan_cart_addition(&product(1, 100, 5), None, 3).unwrap(), 3);
    }

    #[test]
    fn test_cart_addition_merges_quantity() {
        assert_eq!(plan_cart_addition(&product(1, 100, 5), Some(2), 3).unwrap(), 5);
    }

    #[test]
    fn test_cart_addition_reports_combined_quantity() {
        let err = plan_cart_addition(&product(1, 100, 5), Some(3), 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Product 1: available 5, requested 6"
        );
    }

    #[test]
    fn test_cart_addition_over_stock() {
        let err = plan_cart_addition(&product(1, 1000, 5), None, 10).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 10,
                ..
            }
        ));
    }
}
