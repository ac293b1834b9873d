//! # market-core: Pure Business Logic for the Market Demo
//!
//! This crate holds the decision logic of the storefront: what a purchase
//! costs, whether stock covers it, and what stock a reset restores. It has
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Market Demo Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum, JSON over HTTP)              │   │
//! │  │    /api/products  /api/cart  /api/purchase  /api/reset-market   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    market-db (SQLite, sqlx)                     │   │
//! │  │        repositories + transactional workflows                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  restock  │  │   │
//! │  │   │  Product  │  │   Money   │  │   plan    │  │ baseline  │  │   │
//! │  │   │   Order   │  │  (cents)  │  │ purchase  │  │   table   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, CartItem, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`checkout`] - Purchase and add-to-cart planning
//! - [`restock`] - Baseline stock table used by market reset
//! - [`error`] - Domain error types and the error taxonomy
//! - [`validation`] - Input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::money::Money;
//!
//! let price: Money = "29.99".parse().unwrap();
//! let line = price.checked_mul_quantity(2).unwrap();
//!
//! assert_eq!(line.cents(), 5998);
//! assert_eq!(line.to_string(), "59.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod restock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{plan_cart_addition, plan_purchase, PurchasePlan, StockDecrement};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use restock::{baseline_stock, DEFAULT_BASELINE_STOCK};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted in a single add-to-cart request.
///
/// Catches typos like 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of an opaque user identifier.
pub const MAX_USER_ID_LEN: usize = 100;

/// Maximum length of optional free-text product fields.
pub const MAX_TEXT_LEN: usize = 2000;
