//! Catalog endpoints under `/api/sweets`.

use crate::errors::ShopError;
use crate::models::{ApiResponse, NewSweet, Sweet, SweetUpdate};
use crate::routes::AppState;
use crate::services::sweet_service;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Request body for adding a sweet. All fields required on create.
#[derive(Debug, Deserialize)]
pub struct SweetRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// `POST /api/sweets`
pub async fn add_sweet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SweetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Sweet>>), ShopError> {
    let sweet = sweet_service::add_sweet(
        state.sweets.as_ref(),
        NewSweet {
            name: request.name,
            category: request.category,
            price: request.price,
            quantity: request.quantity,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Sweet added successfully", sweet)),
    ))
}

/// `GET /api/sweets`
pub async fn get_all_sweets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Sweet>>>, ShopError> {
    let sweets = sweet_service::get_all_sweets(state.sweets.as_ref()).await?;
    Ok(Json(ApiResponse::ok("Fetched all sweets", sweets)))
}

/// `GET /api/sweets/:id`
pub async fn get_sweet_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Sweet>>, ShopError> {
    let sweet = sweet_service::get_sweet_by_id(state.sweets.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok("Sweet found", sweet)))
}

/// `GET /api/sweets/search`
pub async fn search_sweets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<Sweet>>>, ShopError> {
    let results = sweet_service::search_sweets(
        state.sweets.as_ref(),
        params.query.as_deref(),
        params.min_price,
        params.max_price,
    )
    .await?;

    Ok(Json(ApiResponse::ok("Search results", results)))
}

/// `PUT /api/sweets/:id`
pub async fn update_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<SweetUpdate>,
) -> Result<Json<ApiResponse<Sweet>>, ShopError> {
    let sweet = sweet_service::update_sweet(state.sweets.as_ref(), id, update).await?;
    Ok(Json(ApiResponse::ok("Sweet updated successfully", sweet)))
}

/// `DELETE /api/sweets/:id`
pub async fn delete_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ShopError> {
    sweet_service::delete_sweet(state.sweets.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok_empty("Sweet deleted successfully")))
}
