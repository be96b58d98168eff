//! Router assembly and shared application state.
//!
//! Two subtrees: the public one (`/health`, `/api/auth/*`) which never sees
//! the authentication pipeline, and the guarded one (`/api/sweets/...`)
//! wrapped by the interceptor and the access decision point. The guard is a
//! `route_layer`, so unmatched paths fall through to the router's 404 rather
//! than a misleading 401.

use crate::auth::access::enforce_access;
use crate::auth::interceptor::authenticate;
use crate::config::Config;
use crate::handlers::{auth_handler, inventory_handler, sweet_handler};
use crate::repositories::{SweetStore, UserStore};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Request timeout for the whole service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state. Stores sit behind trait objects so tests can
/// substitute in-memory implementations.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub sweets: Arc<dyn SweetStore>,
    pub config: Config,
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth_handler::register))
        .route("/api/auth/login", post(auth_handler::login));

    // Layer order matters: `authenticate` is added last so it runs first,
    // binding an identity before `enforce_access` consults the policy table.
    let guarded = Router::new()
        .route(
            "/api/sweets",
            get(sweet_handler::get_all_sweets).post(sweet_handler::add_sweet),
        )
        .route("/api/sweets/search", get(sweet_handler::search_sweets))
        .route(
            "/api/sweets/:id",
            get(sweet_handler::get_sweet_by_id)
                .put(sweet_handler::update_sweet)
                .delete(sweet_handler::delete_sweet),
        )
        .route(
            "/api/sweets/:id/purchase",
            post(inventory_handler::purchase_sweet),
        )
        .route(
            "/api/sweets/:id/restock",
            post(inventory_handler::restock_sweet),
        )
        .route_layer(middleware::from_fn(enforce_access))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(public)
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
