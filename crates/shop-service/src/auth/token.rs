//! The credential codec.
//!
//! Credentials are compact JWTs sealed with HS256 (a keyed MAC) over the
//! process-wide signing secret. A successful decode implies the signature
//! matched and the payload was not altered; the secret is never derivable
//! from a credential.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (denial-of-service prevention)
//! - Only HS256 is accepted; tokens claiming any other algorithm fail decode
//! - Expiry is strict (`now >= exp` is expired) with zero clock-skew leeway
//! - Decode failures carry an internal taxonomy (`TokenError`) that is never
//!   surfaced verbatim to callers

use crate::errors::ShopError;
use crate::models::Role;
use chrono::Utc;
use jsonwebtoken::{
    decode as jwt_decode, encode as jwt_encode, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed validity window: a credential dies 30 minutes after issue.
pub const TOKEN_VALIDITY_SECS: i64 = 30 * 60;

/// Maximum accepted credential size in bytes.
///
/// Typical credentials here are under 300 bytes; anything near this limit is
/// garbage and is rejected before base64 decoding or signature verification
/// spends any resources on it.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8192;

/// The sealed payload of a credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// Role at issue time. Advisory only: access decisions use the fresh
    /// Identity Store lookup, never this field.
    pub role: Role,
    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("role", &self.role)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

/// Decode failure taxonomy. Internal to the codec and the interceptor; the
/// HTTP boundary collapses all of these into one fixed 401 message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("credential could not be parsed")]
    Malformed,

    #[error("credential signature is invalid")]
    SignatureInvalid,

    #[error("credential is expired")]
    Expired,
}

/// Issue a new credential for `subject` with the fixed validity window.
///
/// Pure computation; the only failure mode is a misconfigured secret, which
/// surfaces as a generic internal error rather than a domain error.
pub fn issue(subject: &str, role: Role, secret: &[u8]) -> Result<String, ShopError> {
    issue_at(subject, role, secret, Utc::now().timestamp())
}

/// Deterministic variant of [`issue`] against an explicit `now` timestamp.
///
/// Exists so the validity window can be unit-tested without wall-clock
/// dependence.
pub fn issue_at(subject: &str, role: Role, secret: &[u8], now: i64) -> Result<String, ShopError> {
    let claims = Claims {
        sub: subject.to_string(),
        role,
        iat: now,
        exp: now + TOKEN_VALIDITY_SECS,
    };

    jwt_encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| ShopError::Crypto(format!("Credential signing failed: {}", e)))
}

/// Verify and decode a credential.
///
/// Validates the structure and signature, then applies the strict expiry
/// rule. Any tampering with payload or signature yields
/// [`TokenError::SignatureInvalid`]; a structurally broken string yields
/// [`TokenError::Malformed`]; a structurally valid, correctly signed but
/// dead credential yields [`TokenError::Expired`].
pub fn decode(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    decode_at(token, secret, Utc::now().timestamp())
}

/// Deterministic decode against an explicit `now` timestamp.
///
/// Prefer [`decode`] in production code. This variant exists so the expiry
/// boundary (`now >= exp`) can be unit-tested exactly.
pub fn decode_at(token: &str, secret: &[u8], now: i64) -> Result<Claims, TokenError> {
    // Size check before any parsing or cryptographic work.
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        tracing::debug!(
            target: "shop.auth.token",
            token_size = token.len(),
            max_size = MAX_TOKEN_SIZE_BYTES,
            "Credential rejected: size exceeds maximum allowed"
        );
        return Err(TokenError::Malformed);
    }

    // Expiry is checked by hand below so the comparison is strict and uses
    // the injected clock; the library check is disabled.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);

    let data = jwt_decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| {
            tracing::debug!(target: "shop.auth.token", error = %e, "Credential verification failed");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

    // Strict comparison, no leeway: a credential is dead the instant it
    // reaches its expiry timestamp.
    if now >= data.claims.exp {
        tracing::debug!(
            target: "shop.auth.token",
            exp = data.claims.exp,
            now = now,
            "Credential rejected: expired"
        );
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}
