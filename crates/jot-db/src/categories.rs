//! Category repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use jot_core::{new_id, Category, CategoryChanges, CategoryRepository, Error, Result};

/// PostgreSQL implementation of CategoryRepository.
pub struct PgCategoryRepository {
    pool: Pool<Postgres>,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, name: &str) -> Result<Category> {
        let id = new_id();
        let now = Utc::now();

        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO category (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(created)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM category WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at
             FROM category ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(categories)
    }

    async fn update(&self, id: Uuid, changes: CategoryChanges) -> Result<Option<Category>> {
        let now = Utc::now();

        let updated = sqlx::query_as::<_, Category>(
            r#"
            UPDATE category
            SET name = COALESCE($2, name),
                updated_at = $3
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Category>> {
        let result = sqlx::query_as::<_, Category>(
            "DELETE FROM category WHERE id = $1
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(deleted) => Ok(deleted),
            // The schema declares note.category_id REFERENCES category, so a
            // delete racing a concurrent note write is rejected here even
            // after the service-layer check passed.
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
            {
                Err(Error::CategoryInUse(id))
            }
            Err(e) => Err(Error::Database(e)),
        }
    }
}
