//! The authentication interceptor.
//!
//! Runs in front of every protected route. Its single job is to turn a
//! bearer credential into a verified [`Identity`] attached to the request;
//! it NEVER rejects a request itself. A request that arrives with no
//! credential, a broken credential, or an unknown subject simply continues
//! with no identity attached, and the access decision point downstream
//! produces the uniform 401.
//!
//! The interceptor is idempotent: if an identity is already attached
//! (nested layering, tests), it is left untouched.

use crate::auth::identity::Identity;
use crate::auth::token;
use crate::routes::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use std::sync::Arc;

/// Header scheme prefix for bearer credentials.
const BEARER_PREFIX: &str = "Bearer ";

pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<Identity>().is_none() {
        // Copy the header out before awaiting: holding `&Request` across an
        // await point makes the middleware future non-`Send`.
        let header = request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if let Some(identity) = resolve_identity(&state, header.as_deref()).await {
            request.extensions_mut().insert(identity);
        }
    }

    next.run(request).await
}

/// Attempt to resolve a verified identity from the request's Authorization
/// header. Every failure path collapses to `None`; the reasons are logged at
/// debug level only, so the response gives attackers no verification oracle.
async fn resolve_identity(state: &AppState, header: Option<&str>) -> Option<Identity> {
    let header = header?;

    // Scheme match is exact and case-sensitive.
    let credential = header.strip_prefix(BEARER_PREFIX)?;

    let claims = match token::decode(credential, &state.config.signing_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(target: "shop.auth", error = %e, "Credential rejected");
            return None;
        }
    };

    // Fresh lookup: the subject must still exist, and the authorities used
    // for access decisions are the stored ones, not the sealed role.
    let user = match state.users.find_by_username(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(target: "shop.auth", "Credential subject no longer exists");
            return None;
        }
        Err(e) => {
            tracing::error!(target: "shop.auth", error = %e, "Identity lookup failed");
            return None;
        }
    };

    // Cross-check resolver against credential, and re-apply the expiry rule
    // here so a codec regression cannot let a dead credential through.
    if user.username != claims.sub || Utc::now().timestamp() >= claims.exp {
        tracing::debug!(target: "shop.auth", "Credential failed final consistency checks");
        return None;
    }

    Some(Identity::new(user.username, vec![user.role]))
}
