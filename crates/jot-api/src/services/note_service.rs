//! Note operations with category-reference validation.

use std::sync::Arc;

use uuid::Uuid;

use jot_core::{
    parse_id, CategoryRepository, Error, NewNote, Note, NoteChanges, NoteRepository, Result,
};

/// Partial update for a note as received from the transport. The category
/// reference travels as a string; this layer owns its format check.
#[derive(Debug, Clone, Default)]
pub struct UpdateNoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<String>,
}

/// Note CRUD with referential validation against the category set.
#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { notes, categories }
    }

    /// Resolve a category reference before a write that sets it: format
    /// first (cheap, no store call), existence second. Rejecting here is
    /// what keeps an inconsistent note from ever being written.
    async fn resolve_category(&self, reference: &str) -> Result<Uuid> {
        let id = parse_id(reference)?;
        match self.categories.fetch(id).await? {
            Some(_) => Ok(id),
            None => Err(Error::ReferenceNotFound(id)),
        }
    }

    /// Create a note. The category reference must name an existing
    /// category at the time of the write.
    pub async fn create(&self, title: String, content: String, category_ref: &str) -> Result<Note> {
        let category_id = self.resolve_category(category_ref).await?;
        self.notes
            .insert(NewNote {
                title,
                content,
                category_id,
            })
            .await
    }

    /// List all notes, newest first.
    pub async fn list(&self) -> Result<Vec<Note>> {
        self.notes.list().await
    }

    /// Get a note by id. Absence is reported as `None`; callers decide how
    /// to surface it.
    pub async fn get(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        self.notes.fetch(id).await
    }

    /// Merge-update a note. A category reference in the partial update goes
    /// through the same two-stage validation as on create; fields absent
    /// from the input keep their stored value. `updated_at` is refreshed
    /// unconditionally on success.
    pub async fn update(&self, id: &str, input: UpdateNoteInput) -> Result<Note> {
        let id = parse_id(id)?;

        let category_id = match input.category_id.as_deref() {
            Some(reference) => Some(self.resolve_category(reference).await?),
            None => None,
        };

        let changes = NoteChanges {
            title: input.title,
            content: input.content,
            category_id,
        };

        self.notes
            .update(id, changes)
            .await?
            .ok_or(Error::NoteNotFound(id))
    }

    /// Hard-delete a note. Deleting a nonexistent id is a no-op returning
    /// `None`; a malformed id still fails the format check.
    pub async fn delete(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        self.notes.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_db::MemoryStore;
    use std::time::Duration;

    fn service(store: &MemoryStore) -> NoteService {
        NoteService::new(Arc::new(store.notes()), Arc::new(store.categories()))
    }

    #[tokio::test]
    async fn test_create_note_under_existing_category() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();

        let note = service(&store)
            .create("A".to_string(), "x".to_string(), &category.id.to_string())
            .await
            .unwrap();

        assert_eq!(note.title, "A");
        assert_eq!(note.content, "x");
        assert_eq!(note.category_id, category.id);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test]
    async fn test_create_note_with_malformed_reference_persists_nothing() {
        let store = MemoryStore::new();
        let svc = service(&store);

        let err = svc
            .create("A".to_string(), String::new(), "not-a-valid-id")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidReference(_)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_note_with_unknown_reference_persists_nothing() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let unused = jot_core::new_id();

        let err = svc
            .create("A".to_string(), String::new(), &unused.to_string())
            .await
            .unwrap_err();

        match err {
            Error::ReferenceNotFound(id) => assert_eq!(id, unused),
            other => panic!("Expected ReferenceNotFound, got {:?}", other),
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_and_refreshes_updated_at() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let svc = service(&store);

        let note = svc
            .create("title".to_string(), "content".to_string(), &category.id.to_string())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2)).await;
        let updated = svc
            .update(
                &note.id.to_string(),
                UpdateNoteInput {
                    content: Some("revised".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "title");
        assert_eq!(updated.content, "revised");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_unknown_category_leaves_note_unchanged() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let svc = service(&store);

        let note = svc
            .create("A".to_string(), "x".to_string(), &category.id.to_string())
            .await
            .unwrap();

        let err = svc
            .update(
                &note.id.to_string(),
                UpdateNoteInput {
                    title: Some("changed".to_string()),
                    category_id: Some(jot_core::new_id().to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ReferenceNotFound(_)));

        let unchanged = svc.get(&note.id.to_string()).await.unwrap().unwrap();
        assert_eq!(unchanged, note);
    }

    #[tokio::test]
    async fn test_update_unknown_note_fails_not_found() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let unknown = jot_core::new_id();

        let err = svc
            .update(&unknown.to_string(), UpdateNoteInput::default())
            .await
            .unwrap_err();

        match err {
            Error::NoteNotFound(id) => assert_eq!(id, unknown),
            other => panic!("Expected NoteNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let svc = service(&store);

        let note = svc
            .create("A".to_string(), String::new(), &category.id.to_string())
            .await
            .unwrap();

        assert!(svc.delete(&note.id.to_string()).await.unwrap().is_some());
        assert!(svc.delete(&note.id.to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_with_malformed_id_fails_format_check() {
        let store = MemoryStore::new();
        let err = service(&store).delete("nope").await.unwrap_err();
        assert!(matches!(err, Error::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let svc = service(&store);
        let reference = category.id.to_string();

        svc.create("first".to_string(), String::new(), &reference)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        svc.create("second".to_string(), String::new(), &reference)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let newest = svc
            .create("third".to_string(), String::new(), &reference)
            .await
            .unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].id, newest.id);
        assert_eq!(listed[2].title, "first");
    }
}
