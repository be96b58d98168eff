//! Builder for forging test credentials.
//!
//! Produces real HS256 tokens over [`TEST_SIGNING_SECRET`](crate::TEST_SIGNING_SECRET)
//! by default, with knobs for every edge case the pipeline must reject:
//! expired windows, foreign secrets, stale roles.

use crate::fixtures::TEST_SIGNING_SECRET;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use shop_service::auth::token::Claims;
use shop_service::models::Role;

/// Fluent builder for test credentials.
///
/// # Example
/// ```rust,ignore
/// let expired = TestTokenBuilder::new()
///     .for_user("alice")
///     .expires_in(-60)
///     .build();
/// ```
pub struct TestTokenBuilder {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
    secret: Vec<u8>,
}

impl TestTokenBuilder {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: "test-subject".to_string(),
            role: Role::User,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(1800)).timestamp(),
            secret: TEST_SIGNING_SECRET.to_vec(),
        }
    }

    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set expiry relative to now. Negative values produce an already-dead
    /// credential.
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Seal with a different secret; the resulting signature will not verify
    /// against the test server's secret.
    pub fn with_secret(mut self, secret: &[u8]) -> Self {
        self.secret = secret.to_vec();
        self
    }

    pub fn build(self) -> String {
        let claims = Claims {
            sub: self.sub,
            role: self.role,
            iat: self.iat,
            exp: self.exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .expect("test credential encoding")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
