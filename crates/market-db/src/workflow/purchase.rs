//! # Purchase Workflow
//!
//! Converts a user's cart into a completed order.
//!
//! ## Steps (one transaction)
//! ```text
//! 1. load cart rows (id order)             none → EmptyCart
//! 2. load each row's product               missing → ProductNotFound
//! 3. plan_purchase()                       short line → InsufficientStock
//! 4. INSERT order (status = completed)
//! 5. guarded stock decrement per product   0 rows → InsufficientStock
//! 6. DELETE the cart rows
//! 7. COMMIT
//! ```
//!
//! Any failure before step 7 drops the transaction, so the ledger, the
//! catalog and the cart are left exactly as they were.

use tracing::{info, warn};

use super::{WorkflowError, WorkflowResult};
use crate::error::DbError;
use crate::pool::Database;
use crate::repository::{cart, order, product};
use market_core::validation::validate_user_id;
use market_core::{plan_purchase, CoreError, NewOrder, OrderStatus, PurchaseReceipt};

/// Purchases everything in `user_id`'s cart.
///
/// ## Returns
/// * `Ok(PurchaseReceipt)` - New order id and the exact total
/// * `Err(WorkflowError::Domain(..))` - Validation, empty cart, missing
///   product or insufficient stock; nothing changed
/// * `Err(WorkflowError::Storage(..))` - Rolled back
pub async fn execute_purchase(db: &Database, user_id: &str) -> WorkflowResult<PurchaseReceipt> {
    let user_id = validate_user_id(user_id)?;

    let mut tx = db.begin_write().await?;

    let items = cart::list_for_user(&mut *tx, &user_id).await?;

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let product = product::fetch_by_id(&mut *tx, item.product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(item.product_id))?;
        lines.push((item, product));
    }

    let plan = plan_purchase(&user_id, &lines).map_err(|err| {
        warn!(user_id = %user_id, error = %err, "Purchase rejected");
        WorkflowError::from(err)
    })?;

    let order = order::insert(
        &mut *tx,
        &NewOrder {
            user_id: user_id.clone(),
            total_cents: plan.total.cents(),
            status: OrderStatus::Completed,
        },
    )
    .await?;

    for decrement in &plan.decrements {
        let applied =
            product::decrement_stock(&mut *tx, decrement.product_id, decrement.quantity).await?;
        if applied {
            continue;
        }

        // Stock moved since the plan was made.
        let current = product::fetch_by_id(&mut *tx, decrement.product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(decrement.product_id))?;
        warn!(
            user_id = %user_id,
            product_id = decrement.product_id,
            available = current.stock,
            requested = decrement.quantity,
            "Stock changed during purchase"
        );
        return Err(CoreError::InsufficientStock {
            product: current.name,
            available: current.stock,
            requested: decrement.quantity,
        }
        .into());
    }

    for id in &plan.cart_item_ids {
        cart::delete(&mut *tx, *id).await?;
    }

    tx.commit().await.map_err(DbError::transaction)?;

    info!(
        user_id = %user_id,
        order_id = order.id,
        total = %plan.total,
        lines = plan.cart_item_ids.len(),
        "Purchase completed"
    );

    Ok(PurchaseReceipt {
        order_id: order.id,
        total: plan.total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::cart::add_to_cart;
    use crate::workflow::test_support::{add_product, file_db, stock_of, test_db};
    use market_core::{ErrorKind, Money};

    #[tokio::test]
    async fn test_purchase_happy_path() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5).await;
        add_to_cart(&db, "u1", p.id, 3).await.unwrap();

        let receipt = execute_purchase(&db, "u1").await.unwrap();

        assert_eq!(receipt.total, Money::from_cents(3000));
        assert_eq!(stock_of(&db, p.id).await, 2);
        assert!(db.carts().items_for_user("u1").await.unwrap().is_empty());

        let orders = db.orders().for_user("u1").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, receipt.order_id);
        assert_eq!(orders[0].total_cents, 3000);
        assert_eq!(orders[0].status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_total_is_exact_over_several_lines() {
        let db = test_db().await;
        let a = add_product(&db, "A", 1999, 10).await;
        let b = add_product(&db, "B", 4999, 10).await;
        let c = add_product(&db, "C", 10, 10).await;
        add_to_cart(&db, "u1", a.id, 3).await.unwrap();
        add_to_cart(&db, "u1", b.id, 1).await.unwrap();
        add_to_cart(&db, "u1", c.id, 7).await.unwrap();

        let receipt = execute_purchase(&db, "u1").await.unwrap();

        assert_eq!(receipt.total.cents(), 3 * 1999 + 4999 + 7 * 10);
        assert_eq!(receipt.total.to_string(), "111.66");
        assert_eq!(stock_of(&db, a.id).await, 7);
        assert_eq!(stock_of(&db, b.id).await, 9);
        assert_eq!(stock_of(&db, c.id).await, 3);
    }

    #[tokio::test]
    async fn test_empty_cart_changes_nothing() {
        let db = test_db().await;
        add_product(&db, "Book", 1000, 5).await;

        let err = execute_purchase(&db, "u1").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EmptyCart);
        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_short_line_fails_whole_purchase() {
        let db = test_db().await;
        let a = add_product(&db, "A", 1000, 5).await;
        let b = add_product(&db, "B", 500, 4).await;
        add_to_cart(&db, "u1", a.id, 2).await.unwrap();
        add_to_cart(&db, "u1", b.id, 4).await.unwrap();

        // Someone else drains B after u1 filled the cart.
        add_to_cart(&db, "u2", b.id, 2).await.unwrap();
        execute_purchase(&db, "u2").await.unwrap();

        let err = execute_purchase(&db, "u1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        assert_eq!(
            err.to_string(),
            "Insufficient stock for B: available 2, requested 4"
        );

        assert_eq!(stock_of(&db, a.id).await, 5);
        assert_eq!(stock_of(&db, b.id).await, 2);
        assert_eq!(db.carts().items_for_user("u1").await.unwrap().len(), 2);
        assert!(db.orders().for_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_user_rejected() {
        let db = test_db().await;
        let err = execute_purchase(&db, "   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_buyers_cannot_oversell() {
        let (_dir, db) = file_db(8).await;
        let p = add_product(&db, "Last Copies", 1000, 3).await;
        let users: Vec<String> = (1..=4).map(|n| format!("u{n}")).collect();
        for user in &users {
            add_to_cart(&db, user, p.id, 3).await.unwrap();
        }

        let handles: Vec<_> = users
            .iter()
            .cloned()
            .map(|user| {
                let db = db.clone();
                tokio::spawn(async move { execute_purchase(&db, &user).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => assert_eq!(err.kind(), ErrorKind::InsufficientStock, "{err}"),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(stock_of(&db, p.id).await, 0);
        assert_eq!(db.orders().list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_buyers_of_different_products_all_succeed() {
        let (_dir, db) = file_db(8).await;
        let mut carts = Vec::new();
        for n in 1..=4 {
            let p = add_product(&db, &format!("Book {n}"), 1000, 10).await;
            let user = format!("u{n}");
            add_to_cart(&db, &user, p.id, 1).await.unwrap();
            carts.push((user, p.id));
        }

        let handles: Vec<_> = carts
            .iter()
            .map(|(user, _)| {
                let db = db.clone();
                let user = user.clone();
                tokio::spawn(async move { execute_purchase(&db, &user).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for (_, product_id) in &carts {
            assert_eq!(stock_of(&db, *product_id).await, 9);
        }
        assert_eq!(db.orders().list().await.unwrap().len(), 4);
    }
}
