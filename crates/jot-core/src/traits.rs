//! Repository traits implemented by the storage backends.
//!
//! The repositories are durability only: they persist and retrieve records
//! but perform no cross-entity validation. Referential checks live in the
//! service layer; the PostgreSQL backend additionally enforces the
//! note → category foreign key at the schema level.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Category, CategoryChanges, NewNote, Note, NoteChanges};

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note with `created_at = updated_at = now`.
    async fn insert(&self, note: NewNote) -> Result<Note>;

    /// Fetch a note by id. Absence is not an error at this layer.
    async fn fetch(&self, id: Uuid) -> Result<Option<Note>>;

    /// List all notes, newest first.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Merge-update a note; fields absent from `changes` keep their stored
    /// value. Refreshes `updated_at`. Returns `None` when the id does not
    /// resolve.
    async fn update(&self, id: Uuid, changes: NoteChanges) -> Result<Option<Note>>;

    /// Hard-delete a note, returning the removed record. Deleting a
    /// nonexistent id is a no-op returning `None`.
    async fn delete(&self, id: Uuid) -> Result<Option<Note>>;

    /// Number of notes referencing the given category.
    async fn count_by_category(&self, category_id: Uuid) -> Result<i64>;
}

/// Repository for category CRUD operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category with `created_at = updated_at = now`.
    async fn insert(&self, name: &str) -> Result<Category>;

    /// Fetch a category by id.
    async fn fetch(&self, id: Uuid) -> Result<Option<Category>>;

    /// List all categories, newest first.
    async fn list(&self) -> Result<Vec<Category>>;

    /// Merge-update a category, refreshing `updated_at`. Returns `None`
    /// when the id does not resolve.
    async fn update(&self, id: Uuid, changes: CategoryChanges) -> Result<Option<Category>>;

    /// Hard-delete a category, returning the removed record. Deleting a
    /// nonexistent id is a no-op returning `None`. Backends with a
    /// schema-level foreign key fail with [`crate::Error::CategoryInUse`]
    /// when notes still reference the category.
    async fn delete(&self, id: Uuid) -> Result<Option<Category>>;
}
