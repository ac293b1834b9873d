//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Executor-generic queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_by_id(executor, id)                                             │
//! │       │                                                                 │
//! │       ├── &SqlitePool          → ProductRepository (one-off reads)     │
//! │       └── &mut *tx             → workflows (inside a transaction)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions take any `SqliteExecutor`, so the workflows reuse the
//! same SQL inside their transaction. [`ProductRepository`] wraps them for
//! callers that only hold the pool.

use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use market_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, stock, category, image_url";

// =============================================================================
// Queries
// =============================================================================

/// All products, ordered by id.
pub async fn list_all<'e, E>(executor: E) -> DbResult<Vec<Product>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
    let products = sqlx::query_as::<_, Product>(&sql)
        .fetch_all(executor)
        .await?;
    Ok(products)
}

/// One product by id.
pub async fn fetch_by_id<'e, E>(executor: E, id: i64) -> DbResult<Option<Product>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

/// Inserts a product and returns it with its generated id.
///
/// The input is expected to be validated already.
pub async fn insert<'e, E>(executor: E, product: &NewProduct) -> DbResult<Product>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO products (name, description, price_cents, stock, category, image_url) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         RETURNING {PRODUCT_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Product>(&sql)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.image_url)
        .fetch_one(executor)
        .await?;
    Ok(created)
}

/// Number of products in the catalog.
pub async fn count<'e, E>(executor: E) -> DbResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// Removes `quantity` units from a product's stock, only if enough remain.
///
/// ## Returns
/// * `Ok(true)` - Stock was decremented
/// * `Ok(false)` - Product missing or stock below `quantity`; nothing changed
///
/// The `stock >= ?` guard makes the check and the write one statement, so
/// two purchases racing for the last units cannot both succeed.
pub async fn decrement_stock<'e, E>(executor: E, id: i64, quantity: i64) -> DbResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE products SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2",
    )
    .bind(id)
    .bind(quantity)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Overwrites a product's stock. Returns false when the id doesn't exist.
pub async fn set_stock<'e, E>(executor: E, id: i64, stock: i64) -> DbResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE products SET stock = ?2 WHERE id = ?1")
        .bind(id)
        .bind(stock)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Every product id, ascending.
pub async fn list_ids<'e, E>(executor: E) -> DbResult<Vec<i64>>
where
    E: SqliteExecutor<'e>,
{
    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM products ORDER BY id")
        .fetch_all(executor)
        .await?;
    Ok(ids)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list().await?;
/// let book = repo.get_by_id(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog in id order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = list_all(&self.pool).await?;
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        debug!(id = id, "Fetching product");
        fetch_by_id(&self.pool, id).await
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");
        insert(&self.pool, product).await
    }

    /// Counts products (used by the seeder to stay idempotent).
    pub async fn count(&self) -> DbResult<i64> {
        count(&self.pool).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
