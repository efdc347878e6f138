//! Category operations.
//!
//! No foreign keys point *from* a category, so there is no reference to
//! validate on create or update — only the non-empty name rule. Deletion is
//! the exception: a category still referenced by notes cannot be removed.

use std::sync::Arc;

use jot_core::{
    parse_id, Category, CategoryChanges, CategoryRepository, Error, NoteRepository, Result,
};

/// Category CRUD with the dependent-notes delete guard.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, notes: Arc<dyn NoteRepository>) -> Self {
        Self { categories, notes }
    }

    /// Create a category. The name must contain at least one
    /// non-whitespace character.
    pub async fn create(&self, name: &str) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(Error::ValidationFailed(
                "category name must not be empty".to_string(),
            ));
        }
        self.categories.insert(name).await
    }

    /// List all categories, newest first.
    pub async fn list(&self) -> Result<Vec<Category>> {
        self.categories.list().await
    }

    /// Get a category by id.
    pub async fn get(&self, id: &str) -> Result<Option<Category>> {
        let id = parse_id(id)?;
        self.categories.fetch(id).await
    }

    /// Merge-update a category, refreshing `updated_at`.
    pub async fn update(&self, id: &str, name: Option<String>) -> Result<Category> {
        let id = parse_id(id)?;

        if let Some(ref name) = name {
            if name.trim().is_empty() {
                return Err(Error::ValidationFailed(
                    "category name must not be empty".to_string(),
                ));
            }
        }

        self.categories
            .update(id, CategoryChanges { name })
            .await?
            .ok_or(Error::CategoryNotFound(id))
    }

    /// Hard-delete a category. Fails with [`Error::CategoryInUse`] while
    /// notes still reference it; deleting a nonexistent id is a no-op. The
    /// PostgreSQL backend re-checks via its foreign key, closing the race
    /// between this count and the delete.
    pub async fn delete(&self, id: &str) -> Result<Option<Category>> {
        let id = parse_id(id)?;

        if self.notes.count_by_category(id).await? > 0 {
            return Err(Error::CategoryInUse(id));
        }

        self.categories.delete(id).await
    }
}
