//! # Market Reset Workflow
//!
//! Returns the demo to its starting state: the order ledger is emptied and
//! every product's stock goes back to its baseline
//! ([`market_core::restock::baseline_stock`]). Carts are left alone.

use tracing::{error, info};

use super::{WorkflowError, WorkflowResult};
use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{order, product};
use market_core::{baseline_stock, ResetSummary};

/// Clears all orders and restocks every product, atomically.
///
/// ## Errors
/// * `WorkflowError::ResetFailed` - any storage failure; the transaction is
///   rolled back and nothing changes
pub async fn reset_market(db: &Database) -> WorkflowResult<ResetSummary> {
    let summary = apply_reset(db).await.map_err(|err| {
        error!(error = %err, "Market reset failed");
        WorkflowError::ResetFailed(err)
    })?;

    info!(
        products_count = summary.products_count,
        orders_deleted = summary.orders_deleted,
        "Market reset"
    );
    Ok(summary)
}

async fn apply_reset(db: &Database) -> DbResult<ResetSummary> {
    let mut tx = db.begin_write().await?;

    let orders_deleted = order::delete_all(&mut *tx).await?;

    let ids = product::list_ids(&mut *tx).await?;
    for id in &ids {
        product::set_stock(&mut *tx, *id, baseline_stock(*id)).await?;
    }

    tx.commit().await.map_err(DbError::transaction)?;

    Ok(ResetSummary {
        products_count: ids.len() as u64,
        orders_deleted,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::cart::add_to_cart;
    use crate::workflow::purchase::execute_purchase;
    use crate::workflow::test_support::{add_product, stock_of, test_db};
    use market_core::ErrorKind;

    #[tokio::test]
    async fn test_reset_restores_baseline_and_clears_orders() {
        let db = test_db().await;
        let mut ids = Vec::new();
        for n in 1..=9 {
            ids.push(add_product(&db, &format!("Book {n}"), 1000, 40).await.id);
        }
        add_to_cart(&db, "u1", ids[0], 5).await.unwrap();
        execute_purchase(&db, "u1").await.unwrap();

        let summary = reset_market(&db).await.unwrap();

        assert_eq!(summary.products_count, 9);
        assert_eq!(summary.orders_deleted, 1);
        assert!(db.orders().list().await.unwrap().is_empty());

        let expected = [25, 15, 30, 20, 18, 35, 12, 22, 10];
        for (id, want) in ids.iter().zip(expected) {
            assert_eq!(stock_of(&db, *id).await, want, "product {id}");
        }
    }

    #[tokio::test]
    async fn test_reset_leaves_carts() {
        let db = test_db().await;
        let p = add_product(&db, "Book", 1000, 5).await;
        add_to_cart(&db, "u1", p.id, 1).await.unwrap();

        reset_market(&db).await.unwrap();

        assert_eq!(db.carts().items_for_user("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_on_empty_catalog() {
        let db = test_db().await;
        let summary = reset_market(&db).await.unwrap();
        assert_eq!(summary.products_count, 0);
        assert_eq!(summary.orders_deleted, 0);
    }

    #[tokio::test]
    async fn test_reset_failure_is_reported() {
        let db = test_db().await;
        db.close().await;

        let err = reset_market(&db).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResetFailed);
    }
}
