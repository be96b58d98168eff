//! Registration and login endpoints. These live outside the guarded subtree
//! and never see the interceptor.

use crate::errors::ShopError;
use crate::models::{ApiResponse, AuthResponse};
use crate::routes::AppState;
use crate::services::auth_service;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Request body for both `/register` and `/login`. The admin key is only
/// meaningful on registration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
    pub admin_key: Option<String>,
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("admin_key", &"[REDACTED]")
            .finish()
    }
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuthRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ShopError> {
    let role = auth_service::register(
        state.users.as_ref(),
        &state.config,
        &request.username,
        &request.password,
        request.admin_key.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_empty(format!("User Registered as {}", role))),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ShopError> {
    let token = auth_service::login(
        state.users.as_ref(),
        &state.config,
        &request.username,
        &request.password,
    )
    .await?;

    Ok(Json(ApiResponse::ok(
        "Login Successful",
        AuthResponse { token },
    )))
}
