//! Order ledger endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{CreateOrderRequest, OrderDto};
use crate::error::ApiResult;
use crate::AppState;

pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderDto>>> {
    let orders = market_db::list_orders(&state.db).await?;
    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}

pub async fn get_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<OrderDto>>> {
    let orders = market_db::orders_for_user(&state.db, &user_id).await?;
    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderDto>)> {
    let new_order = body.into_new_order()?;
    let order = market_db::create_order(&state.db, new_order).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}
