//! # Catalog Workflow
//!
//! Product lookups that report a missing product as a domain error, and
//! validated product creation.

use tracing::info;

use super::WorkflowResult;
use crate::pool::Database;
use market_core::validation::validate_new_product;
use market_core::{CoreError, NewProduct, Product};

/// The whole catalog, id order.
pub async fn list_products(db: &Database) -> WorkflowResult<Vec<Product>> {
    Ok(db.products().list().await?)
}

/// One product, or `ProductNotFound`.
pub async fn get_product(db: &Database, id: i64) -> WorkflowResult<Product> {
    db.products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(id).into())
}

/// Validates and inserts a product.
pub async fn create_product(db: &Database, product: NewProduct) -> WorkflowResult<Product> {
    let product = validate_new_product(product)?;
    let created = db.products().insert(&product).await?;

    info!(id = created.id, name = %created.name, price = %created.price(), "Product created");
    Ok(created)
}
