//! In-memory implementations of the store traits.
//!
//! Behaviorally equivalent to the Postgres stores (unique usernames and
//! sweet names, case-insensitive search, inclusive price bounds) so the
//! full HTTP surface can be tested without a database.

use async_trait::async_trait;
use shop_service::errors::ShopError;
use shop_service::models::{NewSweet, Role, Sweet, User};
use shop_service::repositories::{SweetStore, UserStore};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            // Ids start at 1, matching BIGSERIAL.
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a user directly, bypassing registration. The hash is stored
    /// as given.
    pub fn insert_user(&self, username: &str, password_hash: &str, role: Role) -> User {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
        };
        self.users.lock().expect("user store poisoned").push(user.clone());
        user
    }

    /// Insert a user with a real bcrypt digest so login works against it.
    pub fn insert_user_with_password(&self, username: &str, password: &str, role: Role) -> User {
        let hash = bcrypt::hash(password, 10).expect("bcrypt hash");
        self.insert_user(username, &hash, role)
    }

    /// Change an existing user's role in place. Lets tests exercise the
    /// fresh-lookup rule against credentials sealed before the change.
    pub fn set_role(&self, username: &str, role: Role) {
        let mut users = self.users.lock().expect("user store poisoned");
        for user in users.iter_mut() {
            if user.username == username {
                user.role = role;
            }
        }
    }

    /// Remove a user entirely, invalidating any outstanding credentials.
    pub fn remove_user(&self, username: &str) {
        let mut users = self.users.lock().expect("user store poisoned");
        users.retain(|u| u.username != username);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopError> {
        let users = self.users.lock().expect("user store poisoned");
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, ShopError> {
        let mut users = self.users.lock().expect("user store poisoned");
        if users.iter().any(|u| u.username == username) {
            return Err(ShopError::UserAlreadyExists);
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
        };
        users.push(user.clone());
        Ok(user)
    }
}

pub struct InMemorySweetStore {
    sweets: Mutex<Vec<Sweet>>,
    next_id: AtomicI64,
}

impl Default for InMemorySweetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySweetStore {
    pub fn new() -> Self {
        Self {
            sweets: Mutex::new(Vec::new()),
            // Ids start at 1, matching BIGSERIAL.
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl SweetStore for InMemorySweetStore {
    async fn list(&self) -> Result<Vec<Sweet>, ShopError> {
        Ok(self.sweets.lock().expect("sweet store poisoned").clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Sweet>, ShopError> {
        let sweets = self.sweets.lock().expect("sweet store poisoned");
        Ok(sweets.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Sweet>, ShopError> {
        let sweets = self.sweets.lock().expect("sweet store poisoned");
        Ok(sweets.iter().find(|s| s.name == name).cloned())
    }

    async fn search(
        &self,
        query: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<Vec<Sweet>, ShopError> {
        let needle = query.map(|q| q.to_lowercase());
        let sweets = self.sweets.lock().expect("sweet store poisoned");

        Ok(sweets
            .iter()
            .filter(|s| {
                needle.as_ref().is_none_or(|n| {
                    s.name.to_lowercase().contains(n) || s.category.to_lowercase().contains(n)
                })
            })
            .filter(|s| min_price.is_none_or(|min| s.price >= min))
            .filter(|s| max_price.is_none_or(|max| s.price <= max))
            .cloned()
            .collect())
    }

    async fn insert(&self, new: &NewSweet) -> Result<Sweet, ShopError> {
        let mut sweets = self.sweets.lock().expect("sweet store poisoned");
        if sweets.iter().any(|s| s.name == new.name) {
            return Err(ShopError::DuplicateSweet);
        }

        let sweet = Sweet {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: new.name.clone(),
            category: new.category.clone(),
            price: new.price,
            quantity: new.quantity,
        };
        sweets.push(sweet.clone());
        Ok(sweet)
    }

    async fn update(&self, updated: &Sweet) -> Result<Sweet, ShopError> {
        let mut sweets = self.sweets.lock().expect("sweet store poisoned");
        for sweet in sweets.iter_mut() {
            if sweet.id == updated.id {
                *sweet = updated.clone();
                return Ok(sweet.clone());
            }
        }
        Err(ShopError::SweetNotFound(format!(
            "Sweet not found with id: {}",
            updated.id
        )))
    }

    async fn delete(&self, id: i64) -> Result<bool, ShopError> {
        let mut sweets = self.sweets.lock().expect("sweet store poisoned");
        let before = sweets.len();
        sweets.retain(|s| s.id != id);
        Ok(sweets.len() < before)
    }
}
