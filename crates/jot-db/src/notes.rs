//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use jot_core::{new_id, Error, NewNote, Note, NoteChanges, NoteRepository, Result};

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, note: NewNote) -> Result<Note> {
        let id = new_id();
        let now = Utc::now();

        let created = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO note (id, title, content, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, title, content, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.category_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(created)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, category_id, created_at, updated_at
             FROM note WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        // id DESC tie-breaks same-millisecond timestamps; ids are UUIDv7,
        // so the order stays newest-first.
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, category_id, created_at, updated_at
             FROM note ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(notes)
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> Result<Option<Note>> {
        let now = Utc::now();

        let updated = sqlx::query_as::<_, Note>(
            r#"
            UPDATE note
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                category_id = COALESCE($4, category_id),
                updated_at = $5
            WHERE id = $1
            RETURNING id, title, content, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.category_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Note>> {
        let deleted = sqlx::query_as::<_, Note>(
            "DELETE FROM note WHERE id = $1
             RETURNING id, title, content, category_id, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(deleted)
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM note WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(count)
    }
}
