//! # HTTP Routes
//!
//! ```text
//! GET    /api/health                 service liveness
//! GET    /metrics, /api/metrics      Prometheus text
//! GET    /api/products               catalog
//! GET    /api/products/{id}          one product
//! POST   /api/products               create product          201
//! GET    /api/cart/{user_id}         cart with products
//! POST   /api/cart                   add to cart             201
//! DELETE /api/cart/{id}              remove one cart row
//! GET    /api/orders                 all orders
//! GET    /api/orders/{user_id}       one user's orders
//! POST   /api/orders                 manual order entry      201
//! POST   /api/purchase               cart → order
//! POST   /api/reset-market           clear orders, restock
//! ```

pub mod cart;
pub mod health;
pub mod market;
pub mod orders;
pub mod products;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::metrics::track_metrics;
use crate::AppState;

/// Builds every route with metrics tracking attached.
pub fn router() -> Router<AppState> {
    // GET and DELETE on /api/cart/{id} share one path segment name; the
    // GET handler reads it as a user id.
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/metrics", get(health::metrics))
        .route("/metrics", get(health::metrics))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/{id}", get(products::get_product))
        .route("/api/cart", post(cart::add_to_cart))
        .route(
            "/api/cart/{id}",
            get(cart::get_cart).delete(cart::remove_from_cart),
        )
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/{user_id}", get(orders::get_user_orders))
        .route("/api/purchase", post(market::purchase))
        .route("/api/reset-market", post(market::reset_market))
        .route_layer(middleware::from_fn(track_metrics))
}
