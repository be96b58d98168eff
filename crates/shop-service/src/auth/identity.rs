//! Request identity.
//!
//! An [`Identity`] is the outcome of a successful interception: a verified
//! subject carrying the authorities the Identity Store reports for it right
//! now. It lives only for one request, travels in the request extensions as
//! an explicit value (no globals, no thread-locals), and handlers reach it
//! through the [`CurrentIdentity`] extractor rather than re-parsing headers.

use crate::errors::ShopError;
use crate::models::Role;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::fmt;

/// A verified caller.
///
/// Authorities are the ones the Identity Store reported at interception
/// time, not the (possibly stale) role sealed into the credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub authorities: Vec<Role>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("subject", &"[REDACTED]")
            .field("authorities", &self.authorities)
            .finish()
    }
}

impl Identity {
    pub fn new(subject: impl Into<String>, authorities: Vec<Role>) -> Self {
        Self {
            subject: subject.into(),
            authorities,
        }
    }

    pub fn has_any(&self, required: &[Role]) -> bool {
        required.iter().any(|r| self.authorities.contains(r))
    }

    pub fn has_all(&self, required: &[Role]) -> bool {
        required.iter().all(|r| self.authorities.contains(r))
    }
}

/// Extractor yielding the request's verified identity.
///
/// Rejects with the fixed 401 envelope when the interceptor attached no
/// identity (missing, malformed, expired, or forged credential, or an
/// unknown subject). Routes behind the policy table normally never see that
/// rejection; it is the backstop for handlers mounted without one.
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ShopError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(ShopError::Unauthenticated)
    }
}
