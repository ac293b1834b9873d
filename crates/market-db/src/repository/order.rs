//! # Order Repository
//!
//! Database operations for the order ledger.
//!
//! Orders are append-only. The only delete is [`delete_all`], used by the
//! market reset.

use chrono::Utc;
use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use market_core::{NewOrder, Order};

const ORDER_COLUMNS: &str = "id, user_id, total_cents, status, created_at";

// =============================================================================
// Queries
// =============================================================================

/// Appends an order and returns it with its id and timestamp.
pub async fn insert<'e, E>(executor: E, order: &NewOrder) -> DbResult<Order>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO orders (user_id, total_cents, status, created_at) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING {ORDER_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Order>(&sql)
        .bind(&order.user_id)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
    Ok(created)
}

/// Every order, in id order.
pub async fn list_all<'e, E>(executor: E) -> DbResult<Vec<Order>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(executor).await?;
    Ok(orders)
}

/// One user's orders, in id order.
pub async fn list_for_user<'e, E>(executor: E, user_id: &str) -> DbResult<Vec<Order>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ?1 ORDER BY id");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(user_id)
        .fetch_all(executor)
        .await?;
    Ok(orders)
}

/// One order by id.
pub async fn fetch_by_id<'e, E>(executor: E, id: i64) -> DbResult<Option<Order>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

/// Clears the ledger. Returns the number of orders removed.
pub async fn delete_all<'e, E>(executor: E) -> DbResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM orders").execute(executor).await?;
    Ok(result.rows_affected())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order reads and manual order entry.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Records an order directly. The input is expected to be validated.
    pub async fn insert(&self, order: &NewOrder) -> DbResult<Order> {
        debug!(user_id = %order.user_id, total_cents = order.total_cents, "Recording order");
        insert(&self.pool, order).await
    }

    /// All orders across users.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        list_all(&self.pool).await
    }

    /// Orders placed by one user.
    pub async fn for_user(&self, user_id: &str) -> DbResult<Vec<Order>> {
        list_for_user(&self.pool, user_id).await
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        fetch_by_id(&self.pool, id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
