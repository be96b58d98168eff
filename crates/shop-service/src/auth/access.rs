//! The access decision point.
//!
//! Access requirements live in one declarative table keyed by HTTP method
//! and the ROUTE TEMPLATE the router matched (`/api/sweets/:id`, not the
//! literal URL), so path aliasing, trailing slashes, or case games cannot
//! route around a rule. One middleware, [`enforce_access`], evaluates the
//! table before any handler runs.
//!
//! Decision contract:
//! - rule present, no identity bound  => 401 `Unauthenticated`
//! - identity bound, authorities fail => 403 `Forbidden`
//! - anything unmatched in the guarded subtree falls to the default rule
//!   (authenticated), never to "open".

use crate::auth::identity::Identity;
use crate::errors::ShopError;
use crate::models::Role;
use axum::extract::{MatchedPath, Request};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

/// How a rule's required authorities combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// At least one required authority must be held.
    Any,
    /// Every required authority must be held.
    All,
}

/// Declarative access requirement for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRule {
    pub required: &'static [Role],
    pub mode: Mode,
}

impl AccessRule {
    /// Any verified identity is enough; no particular authority required.
    pub const fn authenticated() -> Self {
        Self {
            required: &[],
            mode: Mode::Any,
        }
    }

    pub const fn any_of(required: &'static [Role]) -> Self {
        Self {
            required,
            mode: Mode::Any,
        }
    }

    pub const fn all_of(required: &'static [Role]) -> Self {
        Self {
            required,
            mode: Mode::All,
        }
    }

    /// Evaluate this rule against the request's bound identity, if any.
    pub fn check(&self, identity: Option<&Identity>) -> Result<(), ShopError> {
        let identity = identity.ok_or(ShopError::Unauthenticated)?;

        if self.required.is_empty() {
            return Ok(());
        }

        let satisfied = match self.mode {
            Mode::Any => identity.has_any(self.required),
            Mode::All => identity.has_all(self.required),
        };

        if satisfied {
            Ok(())
        } else {
            Err(ShopError::Forbidden)
        }
    }
}

const ADMIN_ONLY: AccessRule = AccessRule::any_of(&[Role::Admin]);
const ANY_CUSTOMER: AccessRule = AccessRule::any_of(&[Role::User, Role::Admin]);
const AUTHENTICATED: AccessRule = AccessRule::authenticated();

/// The policy table for the guarded subtree.
///
/// Keyed by route template as reported by the router, so every literal URL
/// that reaches a handler maps to exactly one row here.
pub fn rule_for(method: &Method, route_template: &str) -> AccessRule {
    match (method, route_template) {
        (&Method::POST, "/api/sweets") => ADMIN_ONLY,
        (&Method::GET, "/api/sweets") => AUTHENTICATED,
        (&Method::GET, "/api/sweets/search") => AUTHENTICATED,
        (&Method::GET, "/api/sweets/:id") => AUTHENTICATED,
        (&Method::PUT, "/api/sweets/:id") => ADMIN_ONLY,
        (&Method::DELETE, "/api/sweets/:id") => ADMIN_ONLY,
        (&Method::POST, "/api/sweets/:id/purchase") => ANY_CUSTOMER,
        (&Method::POST, "/api/sweets/:id/restock") => ADMIN_ONLY,
        // Fail closed: anything mounted under the guard without an explicit
        // row still requires a verified identity.
        _ => AUTHENTICATED,
    }
}

/// Middleware applying the policy table. Mounted as a `route_layer` on the
/// guarded subtree, after the interceptor has had its chance to bind an
/// identity.
pub async fn enforce_access(request: Request, next: Next) -> Result<Response, ShopError> {
    let template = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let rule = rule_for(request.method(), &template);
    let identity = request.extensions().get::<Identity>();

    if let Err(e) = rule.check(identity) {
        tracing::debug!(
            target: "shop.auth",
            method = %request.method(),
            route = %template,
            outcome = %e,
            "Access denied"
        );
        return Err(e);
    }

    Ok(next.run(request).await)
}
