//! Persistence layer.
//!
//! Storage sits behind two async trait seams so the service logic and the
//! authentication pipeline never touch `sqlx` directly: the Identity Store
//! ([`UserStore`]) and the Catalog Store ([`SweetStore`]). Production wires
//! in the Postgres implementations; tests substitute in-memory stores.

pub mod sweets;
pub mod users;

pub use sweets::PgSweetStore;
pub use users::PgUserStore;

use crate::errors::ShopError;
use crate::models::{NewSweet, Role, Sweet, User};
use async_trait::async_trait;

/// The Identity Store: authoritative record of who exists and what role
/// they hold right now.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopError>;

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, ShopError>;
}

/// The Catalog Store: sweets and their stock levels.
#[async_trait]
pub trait SweetStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Sweet>, ShopError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Sweet>, ShopError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Sweet>, ShopError>;

    /// Filtered search. `query` matches name or category, case-insensitive
    /// substring; price bounds are inclusive. All filters are optional and
    /// combine conjunctively.
    async fn search(
        &self,
        query: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<Vec<Sweet>, ShopError>;

    async fn insert(&self, sweet: &NewSweet) -> Result<Sweet, ShopError>;

    /// Persist every field of an existing sweet, matched by id.
    async fn update(&self, sweet: &Sweet) -> Result<Sweet, ShopError>;

    /// Returns `false` when no row with that id existed.
    async fn delete(&self, id: i64) -> Result<bool, ShopError>;
}
