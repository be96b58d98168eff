//! Fixed test fixtures: signing secret, admin key, config, and a pre-seeded
//! application state.

use crate::memory_stores::{InMemorySweetStore, InMemoryUserStore};
use base64::{engine::general_purpose, Engine as _};
use shop_service::config::Config;
use shop_service::models::Role;
use shop_service::routes::AppState;
use std::collections::HashMap;
use std::sync::Arc;

/// Deterministic 32-byte signing secret shared by every test credential.
pub const TEST_SIGNING_SECRET: &[u8] = &[42u8; 32];

/// Admin signup key configured on test servers.
pub const TEST_ADMIN_KEY: &str = "test-admin-signup-key";

/// Placeholder digest for directly-inserted users. Not verifiable; tests
/// that exercise login must register through the service so a real bcrypt
/// digest is produced.
pub const UNUSED_PASSWORD_HASH: &str = "$2b$12$unused.fixture.hash.not.verifiable";

/// Build a [`Config`] through the real loader, with the test fixtures wired
/// in.
pub fn test_config() -> Config {
    let vars: HashMap<String, String> = [
        (
            "DATABASE_URL".to_string(),
            "postgres://unused/test".to_string(),
        ),
        ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        (
            "SHOP_SIGNING_SECRET".to_string(),
            general_purpose::STANDARD.encode(TEST_SIGNING_SECRET),
        ),
        ("ADMIN_SIGNUP_KEY".to_string(), TEST_ADMIN_KEY.to_string()),
        // Minimum cost keeps test bcrypt work cheap.
        ("BCRYPT_COST".to_string(), "10".to_string()),
    ]
    .into_iter()
    .collect();

    Config::from_vars(&vars).expect("test config must be valid")
}

/// Application state backed by in-memory stores, pre-seeded with two
/// accounts: `alice` (USER) and `root` (ADMIN). Neither has a verifiable
/// password.
pub fn test_state() -> Arc<AppState> {
    let users = InMemoryUserStore::new();
    users.insert_user("alice", UNUSED_PASSWORD_HASH, Role::User);
    users.insert_user("root", UNUSED_PASSWORD_HASH, Role::Admin);

    Arc::new(AppState {
        users: Arc::new(users),
        sweets: Arc::new(InMemorySweetStore::new()),
        config: test_config(),
    })
}

/// Application state with in-memory stores and no seeded data.
pub fn empty_state() -> Arc<AppState> {
    Arc::new(AppState {
        users: Arc::new(InMemoryUserStore::new()),
        sweets: Arc::new(InMemorySweetStore::new()),
        config: test_config(),
    })
}
