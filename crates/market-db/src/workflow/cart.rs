//! # Cart Workflow
//!
//! Adding to a cart merges into the existing row for the same product:
//!
//! ```text
//! add(u1, book, 2)   → row { u1, book, 2 }
//! add(u1, book, 3)   → row { u1, book, 5 }   (same row, updated in place)
//! ```
//!
//! The stock check compares the combined quantity with current stock. It
//! reserves nothing; the purchase checks again.

use tracing::{debug, info, warn};

use super::{WorkflowError, WorkflowResult};
use crate::error::DbError;
use crate::pool::Database;
use crate::repository::{cart, product};
use market_core::validation::{validate_quantity, validate_user_id};
use market_core::{plan_cart_addition, CartItem, CartLine, CoreError};

/// Adds `quantity` units of a product to a user's cart.
///
/// ## Errors
/// * Validation - blank user id, quantity outside 1..=999
/// * `ProductNotFound` - no such product
/// * `InsufficientStock` - combined quantity exceeds stock
pub async fn add_to_cart(
    db: &Database,
    user_id: &str,
    product_id: i64,
    quantity: i64,
) -> WorkflowResult<CartItem> {
    let user_id = validate_user_id(user_id)?;
    validate_quantity(quantity)?;

    let mut tx = db.begin_write().await?;

    let product = product::fetch_by_id(&mut *tx, product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let existing = cart::find_line(&mut *tx, &user_id, product_id).await?;

    let new_quantity =
        plan_cart_addition(&product, existing.as_ref().map(|row| row.quantity), quantity)
            .map_err(|err| {
                warn!(user_id = %user_id, product_id = product_id, error = %err, "Add to cart rejected");
                WorkflowError::from(err)
            })?;

    let item = match existing {
        Some(row) => cart::update_quantity(&mut *tx, row.id, new_quantity).await?,
        None => cart::insert(&mut *tx, &user_id, product_id, new_quantity).await?,
    };

    tx.commit().await.map_err(DbError::transaction)?;

    info!(
        user_id = %user_id,
        product_id = product_id,
        quantity = item.quantity,
        "Cart updated"
    );
    Ok(item)
}

/// Removes one cart row by id.
pub async fn remove_cart_item(db: &Database, id: i64) -> WorkflowResult<()> {
    if !db.carts().remove(id).await? {
        return Err(CoreError::CartItemNotFound(id).into());
    }
    Ok(())
}

/// A user's cart with products embedded, in id order.
pub async fn cart_for_user(db: &Database, user_id: &str) -> WorkflowResult<Vec<CartLine>> {
    let user_id = validate_user_id(user_id)?;
    let lines = db.carts().lines_for_user(&user_id).await?;
    debug!(user_id = %user_id, lines = lines.len(), "Cart viewed");
    Ok(lines)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::test_support::{add_product, stock_of, test_db};
    use market_core::ErrorKind;

    #[tokio::test]
    async fn test_new_row() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5).await;

        let item = add_to_cart(&db, "u1", p.id, 3).await.unwrap();

        assert_eq!(item.user_id, "u1");
        assert_eq!(item.product_id, p.id);
        assert_eq!(item.quantity, 3);
    }

    #[tokio::test]
    async fn test_same_product_twice_merges() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 10).await;

        let first = add_to_cart(&db, "u1", p.id, 2).await.unwrap();
        let second = add_to_cart(&db, "u1", p.id, 3).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 5);
        assert_eq!(db.carts().items_for_user("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_over_stock_leaves_cart_empty() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5).await;

        let err = add_to_cart(&db, "u2", p.id, 10).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        assert!(db.carts().items_for_user("u2").await.unwrap().is_empty());
        assert_eq!(stock_of(&db, p.id).await, 5);
    }

    #[tokio::test]
    async fn test_merge_over_stock_keeps_existing_row() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5).await;
        add_to_cart(&db, "u1", p.id, 3).await.unwrap();

        let err = add_to_cart(&db, "u1", p.id, 3).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Insufficient stock for Book: available 5, requested 6"
        );
        let items = db.carts().items_for_user("u1").await.unwrap();
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_missing_product() {
        let db = test_db().await;
        let err = add_to_cart(&db, "u1", 42, 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_quantity_bounds() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5000).await;

        assert_eq!(
            add_to_cart(&db, "u1", p.id, 0).await.unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            add_to_cart(&db, "u1", p.id, 1000).await.unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert!(add_to_cart(&db, "u1", p.id, 999).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_and_view() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5).await;
        let item = add_to_cart(&db, "u1", p.id, 1).await.unwrap();

        let lines = cart_for_user(&db, "u1").await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.name, "Book");

        remove_cart_item(&db, item.id).await.unwrap();
        assert!(cart_for_user(&db, "u1").await.unwrap().is_empty());

        let err = remove_cart_item(&db, item.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
