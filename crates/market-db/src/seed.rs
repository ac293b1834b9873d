//! # Demo Catalog Seeding
//!
//! The eight books the storefront ships with. Their insertion order gives
//! them ids 1-8 on a fresh database, which is what the baseline restock
//! table in `market_core::restock` is keyed on.

use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::product;
use market_core::NewProduct;

/// (name, description, price in cents, initial stock)
const DEMO_BOOKS: &[(&str, &str, i64, i64)] = &[
    (
        "DevOps Handbook",
        "The definitive guide to DevOps practices and principles",
        4999,
        25,
    ),
    (
        "Kubernetes in Action",
        "Learn Kubernetes from the ground up with practical examples",
        5999,
        15,
    ),
    (
        "Docker Deep Dive",
        "Master Docker containers and orchestration",
        3999,
        30,
    ),
    (
        "Terraform Up & Running",
        "Infrastructure as Code with Terraform",
        4499,
        20,
    ),
    (
        "Prometheus Monitoring",
        "Complete guide to monitoring with Prometheus",
        3499,
        18,
    ),
    (
        "CI/CD Pipeline Guide",
        "Build robust CI/CD pipelines with GitHub Actions",
        2999,
        35,
    ),
    (
        "Microservices Architecture",
        "Design and implement microservices patterns",
        5499,
        12,
    ),
    (
        "Security in DevOps",
        "DevSecOps practices and security automation",
        4999,
        22,
    ),
];

/// What [`seed_demo_catalog`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Catalog was empty; this many products were inserted.
    Seeded(usize),
    /// Catalog already had this many products; nothing was inserted.
    Skipped(i64),
}

/// The demo catalog as insertable records.
pub fn demo_catalog() -> Vec<NewProduct> {
    DEMO_BOOKS
        .iter()
        .map(|(name, description, price_cents, stock)| NewProduct {
            name: name.to_string(),
            description: Some(description.to_string()),
            price_cents: *price_cents,
            stock: *stock,
            category: Some("Books".to_string()),
            image_url: None,
        })
        .collect()
}

/// Inserts the demo catalog if, and only if, the catalog is empty.
///
/// All eight inserts share one transaction.
pub async fn seed_demo_catalog(db: &Database) -> DbResult<SeedOutcome> {
    let existing = db.products().count().await?;
    if existing > 0 {
        info!(existing = existing, "Catalog not empty, skipping seed");
        return Ok(SeedOutcome::Skipped(existing));
    }

    let catalog = demo_catalog();
    let mut tx = db.begin_write().await?;
    for book in &catalog {
        product::insert(&mut *tx, book).await?;
    }
    tx.commit().await.map_err(DbError::transaction)?;

    info!(count = catalog.len(), "Seeded demo catalog");
    Ok(SeedOutcome::Seeded(catalog.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use market_core::restock::baseline_stock;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(seed_demo_catalog(&db).await.unwrap(), SeedOutcome::Seeded(8));
        assert_eq!(seed_demo_catalog(&db).await.unwrap(), SeedOutcome::Skipped(8));
        assert_eq!(db.products().count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_seeded_stock_matches_baseline() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_demo_catalog(&db).await.unwrap();

        for product in db.products().list().await.unwrap() {
            assert_eq!(product.stock, baseline_stock(product.id), "{}", product.name);
        }
    }
}
