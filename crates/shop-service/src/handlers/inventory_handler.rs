//! Stock movement endpoints under `/api/sweets/:id`.

use crate::errors::ShopError;
use crate::models::{ApiResponse, Sweet};
use crate::routes::AppState;
use crate::services::inventory_service;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Quantity is optional at the extractor level so its absence produces the
/// uniform envelope instead of axum's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct RestockParams {
    pub quantity: Option<i32>,
}

/// `POST /api/sweets/:id/purchase`
pub async fn purchase_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Sweet>>, ShopError> {
    let sweet = inventory_service::purchase_sweet(state.sweets.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok("Purchase successful", sweet)))
}

/// `POST /api/sweets/:id/restock?quantity=n`
pub async fn restock_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<RestockParams>,
) -> Result<Json<ApiResponse<Sweet>>, ShopError> {
    let quantity = params
        .quantity
        .ok_or_else(|| ShopError::InvalidRequest("Restock quantity is required".to_string()))?;
    let sweet = inventory_service::restock_sweet(state.sweets.as_ref(), id, quantity).await?;
    Ok(Json(ApiResponse::ok("Restock successful", sweet)))
}
