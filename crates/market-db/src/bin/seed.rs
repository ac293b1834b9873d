//! # Seed Data Loader
//!
//! Populates an empty database with the demo book catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./market.db (default)
//! cargo run -p market-db --bin seed
//!
//! # Specify database path
//! cargo run -p market-db --bin seed -- --db ./data/market.db
//! ```
//!
//! Running it again is harmless: a catalog that already has products is
//! left untouched.

use anyhow::Result;
use clap::Parser;
use market_db::seed::{seed_demo_catalog, SeedOutcome};
use market_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Market demo seed data loader
#[derive(Parser)]
#[command(name = "seed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database file path
    #[arg(short, long, env = "DATABASE_PATH", default_value = "./market.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    println!("🌱 Market Demo Seed Data Loader");
    println!("================================");
    println!("Database: {}", cli.db);
    println!();

    let db = Database::new(DbConfig::new(&cli.db)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    match seed_demo_catalog(&db).await? {
        SeedOutcome::Skipped(existing) => {
            println!("⚠ Database already has {} products", existing);
            println!("  Skipping seed to avoid duplicates.");
        }
        SeedOutcome::Seeded(count) => {
            println!("✓ Seeded {} products", count);
            println!();
            for product in db.products().list().await? {
                println!(
                    "  • {} - ${} (Stock: {})",
                    product.name,
                    product.price(),
                    product.stock
                );
            }
        }
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
