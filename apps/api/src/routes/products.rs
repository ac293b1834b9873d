//! Catalog endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{CreateProductRequest, ProductDto};
use crate::error::ApiResult;
use crate::AppState;

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = market_db::list_products(&state.db).await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProductDto>> {
    let product = market_db::get_product(&state.db, id).await?;
    Ok(Json(product.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let new_product = body.into_new_product()?;
    let product = market_db::create_product(&state.db, new_product).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}
