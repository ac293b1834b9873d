//! Purchase and market reset.

use axum::{extract::State, Json};

use crate::dto::{PurchaseRequest, PurchaseResponse, ResetResponse};
use crate::error::ApiResult;
use crate::AppState;

pub async fn purchase(
    State(state): State<AppState>,
    Json(body): Json<PurchaseRequest>,
) -> ApiResult<Json<PurchaseResponse>> {
    let receipt = market_db::execute_purchase(&state.db, &body.user_id).await?;
    Ok(Json(receipt.into()))
}

pub async fn reset_market(State(state): State<AppState>) -> ApiResult<Json<ResetResponse>> {
    let summary = market_db::reset_market(&state.db).await?;
    Ok(Json(ResetResponse {
        products_count: summary.products_count,
    }))
}
