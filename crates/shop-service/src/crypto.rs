//! Password hashing.
//!
//! Passwords are hashed with bcrypt at a configurable cost factor. Plaintext
//! passwords are never stored, logged, or echoed back; the only operations
//! are one-way hash and constant-time verify.

use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::ShopError;
use tracing::instrument;

/// Hash a password with bcrypt at the given cost factor.
///
/// The cost is validated here even though config already enforces the
/// bounds, so a direct call with a bad cost cannot produce a weak hash.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, ShopError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(ShopError::Crypto(format!(
            "Invalid bcrypt cost: {} (must be {}-{})",
            cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| ShopError::Crypto(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored bcrypt hash.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ShopError> {
    bcrypt::verify(password, hash)
        .map_err(|e| ShopError::Crypto(format!("Password verification failed: {}", e)))
}
