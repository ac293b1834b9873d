//! # Repository Module
//!
//! Database access for the three tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │  db.products().list()                                          │
//! │       ▼                                                                 │
//! │  ProductRepository / CartRepository / OrderRepository                  │
//! │       │  thin wrappers over the pool                                   │
//! │       ▼                                                                 │
//! │  product:: / cart:: / order:: free functions (any SqliteExecutor)      │
//! │       ▲                                                                 │
//! │       │  same functions with &mut *tx                                  │
//! │  workflow:: (purchase, reset, add to cart)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog reads and inserts
//! - [`CartRepository`](cart::CartRepository) - Cart reads and removal
//! - [`OrderRepository`](order::OrderRepository) - Ledger reads and manual entry

pub mod cart;
pub mod order;
pub mod product;
