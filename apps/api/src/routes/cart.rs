//! Cart endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{AddToCartRequest, CartItemDto, CartLineDto, MessageResponse};
use crate::error::ApiResult;
use crate::AppState;

pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<CartLineDto>>> {
    let lines = market_db::cart_for_user(&state.db, &user_id).await?;
    Ok(Json(lines.into_iter().map(CartLineDto::from).collect()))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> ApiResult<(StatusCode, Json<CartItemDto>)> {
    let item =
        market_db::add_to_cart(&state.db, &body.user_id, body.product_id, body.quantity).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    market_db::remove_cart_item(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Item removed from cart".to_string(),
    }))
}
