//! # market-db: Database Layer for the Market Demo
//!
//! SQLite storage for the catalog, carts and order ledger, plus the
//! transactional workflows that tie them together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Market Demo Data Flow                            │
//! │                                                                         │
//! │  HTTP handler (POST /api/purchase)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     market-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Workflows   │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │               │    │               │    │  (embedded)  │  │   │
//! │  │   │ purchase      │───►│ product       │    │              │  │   │
//! │  │   │ reset         │    │ cart          │    │ 001_initial  │  │   │
//! │  │   │ cart          │    │ order         │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │ plan (pure)         │                               │   │
//! │  │           ▼                     ▼                               │   │
//! │  │      market-core          Database (pool.rs)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (WAL) ── products, cart_items, orders                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Per-table queries
//! - [`seed`] - Demo catalog
//! - [`workflow`] - Purchase, reset, cart, catalog and ledger operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_db::{add_to_cart, execute_purchase, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./market.db")).await?;
//!
//! add_to_cart(&db, "user123", 1, 2).await?;
//! let receipt = execute_purchase(&db, "user123").await?;
//! println!("order {} for {}", receipt.order_id, receipt.total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;

pub use workflow::cart::{add_to_cart, cart_for_user, remove_cart_item};
pub use workflow::catalog::{create_product, get_product, list_products};
pub use workflow::ledger::{create_order, list_orders, orders_for_user};
pub use workflow::purchase::execute_purchase;
pub use workflow::reset::reset_market;
pub use workflow::{WorkflowError, WorkflowResult};
