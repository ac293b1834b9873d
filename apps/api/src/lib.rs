//! # market-api: HTTP Service for the Market Demo
//!
//! JSON over HTTP for the storefront frontend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Market API Server                                │
//! │                                                                         │
//! │  Storefront ───► HTTP (5000) ───► routes ───► market-db ───► SQLite    │
//! │                                     │                                   │
//! │                       ┌─────────────┼──────────────┐                    │
//! │                       ▼             ▼              ▼                    │
//! │                 track_metrics   TraceLayer     CorsLayer                │
//! │                 (Prometheus)    (tracing)      (main.rs)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`app`] builds the router without binding a socket, so tests drive it
//! with `tower::ServiceExt::oneshot`.

pub mod config;
pub mod dto;
pub mod error;
pub mod metrics;
pub mod routes;

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use market_db::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(db: Database, metrics: PrometheusHandle) -> Self {
        AppState { db, metrics }
    }
}

/// Builds the full router with request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
