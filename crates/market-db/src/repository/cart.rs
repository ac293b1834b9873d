//! # Cart Repository
//!
//! Database operations for cart rows.
//!
//! At most one row exists per (user_id, product_id); the unique index
//! `idx_cart_items_user_product` backs the merge logic in
//! [`crate::workflow::cart`].

use chrono::Utc;
use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use market_core::{CartItem, CartLine, Product};

const CART_COLUMNS: &str = "id, user_id, product_id, quantity, created_at";

/// Flat row for the cart/product join.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i64,
    user_id: String,
    product_id: i64,
    quantity: i64,
    product_name: String,
    product_description: Option<String>,
    product_price_cents: i64,
    product_stock: i64,
    product_category: Option<String>,
    product_image_url: Option<String>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            quantity: row.quantity,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                description: row.product_description,
                price_cents: row.product_price_cents,
                stock: row.product_stock,
                category: row.product_category,
                image_url: row.product_image_url,
            },
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// A user's cart rows in id order.
pub async fn list_for_user<'e, E>(executor: E, user_id: &str) -> DbResult<Vec<CartItem>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {CART_COLUMNS} FROM cart_items WHERE user_id = ?1 ORDER BY id");
    let items = sqlx::query_as::<_, CartItem>(&sql)
        .bind(user_id)
        .fetch_all(executor)
        .await?;
    Ok(items)
}

/// A user's cart rows joined with their products, in id order.
pub async fn lines_for_user<'e, E>(executor: E, user_id: &str) -> DbResult<Vec<CartLine>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, CartLineRow>(
        r#"
        SELECT
            c.id,
            c.user_id,
            c.product_id,
            c.quantity,
            p.name        AS product_name,
            p.description AS product_description,
            p.price_cents AS product_price_cents,
            p.stock       AS product_stock,
            p.category    AS product_category,
            p.image_url   AS product_image_url
        FROM cart_items c
        INNER JOIN products p ON p.id = c.product_id
        WHERE c.user_id = ?1
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(CartLine::from).collect())
}

/// The row for (user_id, product_id), if the user already has one.
pub async fn find_line<'e, E>(
    executor: E,
    user_id: &str,
    product_id: i64,
) -> DbResult<Option<CartItem>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {CART_COLUMNS} FROM cart_items WHERE user_id = ?1 AND product_id = ?2"
    );
    let item = sqlx::query_as::<_, CartItem>(&sql)
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
    Ok(item)
}

/// Inserts a new cart row.
pub async fn insert<'e, E>(
    executor: E,
    user_id: &str,
    product_id: i64,
    quantity: i64,
) -> DbResult<CartItem>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO cart_items (user_id, product_id, quantity, created_at) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING {CART_COLUMNS}"
    );
    let item = sqlx::query_as::<_, CartItem>(&sql)
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
    Ok(item)
}

/// Sets the quantity of an existing row and returns the updated row.
pub async fn update_quantity<'e, E>(executor: E, id: i64, quantity: i64) -> DbResult<CartItem>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("UPDATE cart_items SET quantity = ?2 WHERE id = ?1 RETURNING {CART_COLUMNS}");
    let item = sqlx::query_as::<_, CartItem>(&sql)
        .bind(id)
        .bind(quantity)
        .fetch_one(executor)
        .await?;
    Ok(item)
}

/// Deletes one row. Returns false when the id doesn't exist.
pub async fn delete<'e, E>(executor: E, id: i64) -> DbResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cart reads and single-row removal.
///
/// Adding to the cart checks stock, so it lives in
/// [`crate::workflow::cart::add_to_cart`] where it gets a transaction.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Raw cart rows for a user.
    pub async fn items_for_user(&self, user_id: &str) -> DbResult<Vec<CartItem>> {
        list_for_user(&self.pool, user_id).await
    }

    /// Cart rows with their products embedded, as shown to the shopper.
    pub async fn lines_for_user(&self, user_id: &str) -> DbResult<Vec<CartLine>> {
        let lines = lines_for_user(&self.pool, user_id).await?;
        debug!(user_id = %user_id, count = lines.len(), "Loaded cart");
        Ok(lines)
    }

    /// Removes one cart row by id.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row deleted
    /// * `Ok(false)` - No such row
    pub async fn remove(&self, id: i64) -> DbResult<bool> {
        debug!(id = id, "Removing cart item");
        delete(&self.pool, id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
