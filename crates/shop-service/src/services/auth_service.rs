//! Registration and login.
//!
//! The only two places where plaintext passwords are handled, and the only
//! place credentials are issued.

use crate::auth::token;
use crate::config::Config;
use crate::crypto;
use crate::errors::ShopError;
use crate::models::Role;
use crate::repositories::UserStore;
use secrecy::ExposeSecret;

/// Register a new account.
///
/// Role assignment: quoting the configured admin signup key grants ADMIN,
/// anything else (including when no key is configured) grants USER. Returns
/// the granted role.
///
/// # Steps
///
/// 1. Validate username and password are non-empty
/// 2. Reject taken usernames (409)
/// 3. Decide the role from the admin signup key
/// 4. Hash the password
/// 5. Persist
pub async fn register(
    users: &dyn UserStore,
    config: &Config,
    username: &str,
    password: &str,
    admin_key: Option<&str>,
) -> Result<Role, ShopError> {
    if username.trim().is_empty() {
        return Err(ShopError::InvalidRequest("Username is required".to_string()));
    }
    if password.is_empty() {
        return Err(ShopError::InvalidRequest("Password is required".to_string()));
    }

    if users.find_by_username(username).await?.is_some() {
        return Err(ShopError::UserAlreadyExists);
    }

    let role = match (&config.admin_signup_key, admin_key) {
        (Some(expected), Some(given)) if expected.expose_secret() == given => Role::Admin,
        _ => Role::User,
    };

    let password_hash = crypto::hash_password(password, config.bcrypt_cost)?;
    let user = users.create(username, &password_hash, role).await?;

    tracing::info!(target: "shop.auth", role = %user.role, "New account registered");

    Ok(user.role)
}

/// Authenticate and issue a credential.
///
/// Unknown username and wrong password collapse to the same error so this
/// endpoint is not a username oracle. On success exactly one credential is
/// issued, sealed over the subject and its stored role.
pub async fn login(
    users: &dyn UserStore,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<String, ShopError> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(ShopError::InvalidCredentials)?;

    if !crypto::verify_password(password, &user.password_hash)? {
        return Err(ShopError::InvalidCredentials);
    }

    token::issue(&user.username, user.role, &config.signing_secret)
}
