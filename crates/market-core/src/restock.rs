//! # Baseline Restock Table
//!
//! The stock level each product returns to when the market is reset.
//!
//! The table mirrors the seeded catalog: product ids 1-8 are the demo
//! books inserted by the `seed` binary. Any other product resets to
//! [`DEFAULT_BASELINE_STOCK`].

/// Stock for products that have no entry in [`BASELINE_STOCK`].
pub const DEFAULT_BASELINE_STOCK: i64 = 10;

/// Static id → baseline stock lookup.
pub const BASELINE_STOCK: &[(i64, i64)] = &[
    (1, 25),
    (2, 15),
    (3, 30),
    (4, 20),
    (5, 18),
    (6, 35),
    (7, 12),
    (8, 22),
];

/// Returns the baseline stock for a product id.
///
/// ## Example
/// ```rust
/// use market_core::restock::{baseline_stock, DEFAULT_BASELINE_STOCK};
///
/// assert_eq!(baseline_stock(3), 30);
/// assert_eq!(baseline_stock(999), DEFAULT_BASELINE_STOCK);
/// ```
pub fn baseline_stock(product_id: i64) -> i64 {
    BASELINE_STOCK
        .iter()
        .find(|(id, _)| *id == product_id)
        .map(|(_, stock)| *stock)
        .unwrap_or(DEFAULT_BASELINE_STOCK)
}
