use base64::{engine::general_purpose, Engine as _};
use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Bcrypt cost bounds. Below 10 is insecure, above 14 makes login latency
/// unacceptable.
pub const MIN_BCRYPT_COST: u32 = 10;
pub const MAX_BCRYPT_COST: u32 = 14;
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// The signing secret must be exactly this many bytes after base64 decoding.
pub const SIGNING_SECRET_LEN: usize = 32;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Symmetric key sealing every credential the service issues. Process-wide
    /// and immutable for the life of the process; rotating it invalidates all
    /// outstanding credentials.
    pub signing_secret: Vec<u8>,
    /// Registration requests quoting this key are granted the ADMIN role.
    /// When unset, registration only ever produces USER accounts.
    pub admin_signup_key: Option<SecretString>,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("bind_address", &self.bind_address)
            .field("signing_secret", &"[REDACTED]")
            .field("admin_signup_key", &self.admin_signup_key)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing secret: {0}")]
    InvalidSigningSecret(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Invalid bcrypt cost: {0}")]
    InvalidBcryptCost(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let secret_base64 = vars
            .get("SHOP_SIGNING_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOP_SIGNING_SECRET".to_string()))?;

        let signing_secret = general_purpose::STANDARD
            .decode(secret_base64)
            .map_err(ConfigError::Base64Error)?;

        if signing_secret.len() != SIGNING_SECRET_LEN {
            return Err(ConfigError::InvalidSigningSecret(format!(
                "Expected {} bytes, got {}",
                SIGNING_SECRET_LEN,
                signing_secret.len()
            )));
        }

        let admin_signup_key = vars
            .get("ADMIN_SIGNUP_KEY")
            .map(|k| SecretString::from(k.clone()));

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidBcryptCost(format!("Not a number: {}", raw)))?,
            None => DEFAULT_BCRYPT_COST,
        };

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(format!(
                "{} is outside the valid range {}-{}",
                bcrypt_cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
            )));
        }

        Ok(Config {
            database_url,
            bind_address,
            signing_secret,
            admin_signup_key,
            bcrypt_cost,
        })
    }
}
