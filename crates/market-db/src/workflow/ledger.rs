//! # Ledger Workflow
//!
//! Order reads and manual order entry. Purchases record their own orders
//! in [`super::purchase`].

use tracing::info;

use super::WorkflowResult;
use crate::pool::Database;
use market_core::validation::{validate_new_order, validate_user_id};
use market_core::{NewOrder, Order};

/// Every order, id order.
pub async fn list_orders(db: &Database) -> WorkflowResult<Vec<Order>> {
    Ok(db.orders().list().await?)
}

/// One user's orders, id order.
pub async fn orders_for_user(db: &Database, user_id: &str) -> WorkflowResult<Vec<Order>> {
    let user_id = validate_user_id(user_id)?;
    Ok(db.orders().for_user(&user_id).await?)
}

/// Validates and records an order without touching carts or stock.
pub async fn create_order(db: &Database, order: NewOrder) -> WorkflowResult<Order> {
    let order = validate_new_order(order)?;
    let created = db.orders().insert(&order).await?;

    info!(
        order_id = created.id,
        user_id = %created.user_id,
        status = %created.status,
        "Order recorded"
    );
    Ok(created)
}
