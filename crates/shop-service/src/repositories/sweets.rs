//! Postgres-backed Catalog Store.

use super::SweetStore;
use crate::errors::ShopError;
use crate::models::{NewSweet, Sweet};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgSweetStore {
    pool: PgPool,
}

impl PgSweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SweetStore for PgSweetStore {
    async fn list(&self) -> Result<Vec<Sweet>, ShopError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity
            FROM sweets
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to list sweets: {}", e)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Sweet>, ShopError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity
            FROM sweets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to fetch sweet by id: {}", e)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Sweet>, ShopError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity
            FROM sweets
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to fetch sweet by name: {}", e)))
    }

    async fn search(
        &self,
        query: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<Vec<Sweet>, ShopError> {
        // NULL parameters disable their filter; ILIKE gives case-insensitive
        // substring match on name and category.
        let pattern = query.map(|q| format!("%{}%", q));

        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity
            FROM sweets
            WHERE ($1::text IS NULL OR name ILIKE $1 OR category ILIKE $1)
              AND ($2::float8 IS NULL OR price >= $2)
              AND ($3::float8 IS NULL OR price <= $3)
            ORDER BY id
            "#,
        )
        .bind(pattern)
        .bind(min_price)
        .bind(max_price)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to search sweets: {}", e)))
    }

    async fn insert(&self, sweet: &NewSweet) -> Result<Sweet, ShopError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            INSERT INTO sweets (name, category, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, category, price, quantity
            "#,
        )
        .bind(&sweet.name)
        .bind(&sweet.category)
        .bind(sweet.price)
        .bind(sweet.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Unique violation on name; the service pre-checks, this is the
            // backstop for concurrent inserts.
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ShopError::DuplicateSweet
            }
            _ => ShopError::Database(format!("Failed to insert sweet: {}", e)),
        })
    }

    async fn update(&self, sweet: &Sweet) -> Result<Sweet, ShopError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            UPDATE sweets
            SET name = $2, category = $3, price = $4, quantity = $5
            WHERE id = $1
            RETURNING id, name, category, price, quantity
            "#,
        )
        .bind(sweet.id)
        .bind(&sweet.name)
        .bind(&sweet.category)
        .bind(sweet.price)
        .bind(sweet.quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShopError::Database(format!("Failed to update sweet: {}", e)))?
        .ok_or_else(|| ShopError::SweetNotFound(format!("Sweet not found with id: {}", sweet.id)))
    }

    async fn delete(&self, id: i64) -> Result<bool, ShopError> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ShopError::Database(format!("Failed to delete sweet: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
