//! Postgres-backed Identity Store.

use super::UserStore;
use crate::errors::ShopError;
use crate::models::{Role, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::str::FromStr;

/// Raw row shape; the role column is TEXT and converted after fetch.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = ShopError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|e| ShopError::Database(format!("Corrupt role column: {}", e)))?;

        Ok(User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role,
        })
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to fetch user by username: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, ShopError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Unique violation on username; normally pre-checked by the
            // service, this is the backstop for concurrent registrations.
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ShopError::UserAlreadyExists
            }
            _ => ShopError::Database(format!("Failed to create user: {}", e)),
        })?;

        User::try_from(row)
    }
}
