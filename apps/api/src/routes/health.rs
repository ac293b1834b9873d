//! Liveness and metrics endpoints.

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "backend-api".to_string(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
