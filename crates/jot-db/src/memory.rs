//! In-memory store with JSON snapshot persistence.
//!
//! The offline path: both entity sets live in process memory and can be
//! persisted as plain JSON arrays under two named slots, reloaded at
//! startup. Unlike the PostgreSQL backend there is no schema-level foreign
//! key here — the store accepts whatever it is handed, and referential
//! checks happen only in the service layer. Tests also use this store as a
//! drop-in double for the PostgreSQL repositories.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use jot_core::{
    new_id, Category, CategoryChanges, CategoryRepository, NewNote, Note, NoteChanges,
    NoteRepository, Result,
};

/// Snapshot slot holding the serialized note array.
pub const NOTES_SLOT: &str = "notes.json";

/// Snapshot slot holding the serialized category array.
pub const CATEGORIES_SLOT: &str = "categories.json";

#[derive(Default)]
struct Shared {
    notes: RwLock<HashMap<Uuid, Note>>,
    categories: RwLock<HashMap<Uuid, Category>>,
}

/// In-process entity store. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Note repository view over this store.
    pub fn notes(&self) -> MemoryNoteRepository {
        MemoryNoteRepository {
            shared: self.shared.clone(),
        }
    }

    /// Category repository view over this store.
    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository {
            shared: self.shared.clone(),
        }
    }

    /// Load a store from the snapshot slots in `dir`. Missing slots are
    /// treated as empty collections, so a fresh directory yields an empty
    /// store.
    pub async fn load(dir: &Path) -> Result<Self> {
        let store = Self::new();

        if let Some(notes) = read_slot::<Note>(&dir.join(NOTES_SLOT)).await? {
            let mut guard = store.shared.notes.write().await;
            *guard = notes.into_iter().map(|n| (n.id, n)).collect();
        }
        if let Some(categories) = read_slot::<Category>(&dir.join(CATEGORIES_SLOT)).await? {
            let mut guard = store.shared.categories.write().await;
            *guard = categories.into_iter().map(|c| (c.id, c)).collect();
        }

        Ok(store)
    }

    /// Persist both entity sets to the snapshot slots in `dir`, creating
    /// the directory if needed. Arrays are written newest-first.
    pub async fn save(&self, dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir).await?;

        let notes = self.notes().list().await?;
        let categories = self.categories().list().await?;

        tokio::fs::write(dir.join(NOTES_SLOT), serde_json::to_vec_pretty(&notes)?).await?;
        tokio::fs::write(
            dir.join(CATEGORIES_SLOT),
            serde_json::to_vec_pretty(&categories)?,
        )
        .await?;

        Ok(())
    }
}

async fn read_slot<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Sort newest-first: created_at descending, id descending as tie-break
/// (ids are UUIDv7, so equal timestamps still order by insertion).
fn newest_first<T, F: Fn(&T) -> (chrono::DateTime<Utc>, Uuid)>(records: &mut [T], key: F) {
    records.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// In-memory implementation of NoteRepository.
#[derive(Clone)]
pub struct MemoryNoteRepository {
    shared: Arc<Shared>,
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, note: NewNote) -> Result<Note> {
        let now = Utc::now();
        let record = Note {
            id: new_id(),
            title: note.title,
            content: note.content,
            category_id: note.category_id,
            created_at: now,
            updated_at: now,
        };

        let mut notes = self.shared.notes.write().await;
        notes.insert(record.id, record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Note>> {
        let notes = self.shared.notes.read().await;
        Ok(notes.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let notes = self.shared.notes.read().await;
        let mut records: Vec<Note> = notes.values().cloned().collect();
        newest_first(&mut records, |n| (n.created_at, n.id));
        Ok(records)
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> Result<Option<Note>> {
        let mut notes = self.shared.notes.write().await;
        let Some(record) = notes.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(content) = changes.content {
            record.content = content;
        }
        if let Some(category_id) = changes.category_id {
            record.category_id = category_id;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Note>> {
        let mut notes = self.shared.notes.write().await;
        Ok(notes.remove(&id))
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<i64> {
        let notes = self.shared.notes.read().await;
        Ok(notes.values().filter(|n| n.category_id == category_id).count() as i64)
    }
}

/// In-memory implementation of CategoryRepository.
#[derive(Clone)]
pub struct MemoryCategoryRepository {
    shared: Arc<Shared>,
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn insert(&self, name: &str) -> Result<Category> {
        let now = Utc::now();
        let record = Category {
            id: new_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut categories = self.shared.categories.write().await;
        categories.insert(record.id, record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Category>> {
        let categories = self.shared.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let categories = self.shared.categories.read().await;
        let mut records: Vec<Category> = categories.values().cloned().collect();
        newest_first(&mut records, |c| (c.created_at, c.id));
        Ok(records)
    }

    async fn update(&self, id: Uuid, changes: CategoryChanges) -> Result<Option<Category>> {
        let mut categories = self.shared.categories.write().await;
        let Some(record) = categories.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            record.name = name;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Category>> {
        let mut categories = self.shared.categories.write().await;
        Ok(categories.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn new_note(title: &str, category_id: Uuid) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: String::new(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_note() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();

        let note = store
            .notes()
            .insert(new_note("hello", category.id))
            .await
            .unwrap();
        assert_eq!(note.created_at, note.updated_at);

        let fetched = store.notes().fetch(note.id).await.unwrap().unwrap();
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn test_list_notes_newest_first() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let notes = store.notes();

        notes.insert(new_note("first", category.id)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        notes.insert(new_note("second", category.id)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let newest = notes.insert(new_note("third", category.id)).await.unwrap();

        let listed = notes.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].id, newest.id);
        assert_eq!(listed[2].title, "first");
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let notes = store.notes();

        let note = notes
            .insert(NewNote {
                title: "title".to_string(),
                content: "content".to_string(),
                category_id: category.id,
            })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2)).await;
        let updated = notes
            .update(
                note.id,
                NoteChanges {
                    title: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.content, "content");
        assert_eq!(updated.category_id, category.id);
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn test_delete_note_is_idempotent() {
        let store = MemoryStore::new();
        let category = store.categories().insert("Work").await.unwrap();
        let notes = store.notes();

        let note = notes.insert(new_note("gone", category.id)).await.unwrap();

        let first = notes.delete(note.id).await.unwrap();
        assert_eq!(first.map(|n| n.id), Some(note.id));

        let second = notes.delete(note.id).await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_count_by_category() {
        let store = MemoryStore::new();
        let work = store.categories().insert("Work").await.unwrap();
        let ideas = store.categories().insert("Ideas").await.unwrap();
        let notes = store.notes();

        notes.insert(new_note("a", work.id)).await.unwrap();
        notes.insert(new_note("b", work.id)).await.unwrap();
        notes.insert(new_note("c", ideas.id)).await.unwrap();

        assert_eq!(notes.count_by_category(work.id).await.unwrap(), 2);
        assert_eq!(notes.count_by_category(ideas.id).await.unwrap(), 1);
        assert_eq!(notes.count_by_category(new_id()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();

        let category = store.categories().insert("Work").await.unwrap();
        let note = store
            .notes()
            .insert(new_note("persisted", category.id))
            .await
            .unwrap();

        store.save(dir.path()).await.unwrap();

        let reloaded = MemoryStore::load(dir.path()).await.unwrap();
        let notes = reloaded.notes().list().await.unwrap();
        let categories = reloaded.categories().list().await.unwrap();

        assert_eq!(notes, vec![note]);
        assert_eq!(categories, vec![category]);
    }

    #[tokio::test]
    async fn test_load_from_empty_dir_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::load(dir.path()).await.unwrap();
        assert!(store.notes().list().await.unwrap().is_empty());
        assert!(store.categories().list().await.unwrap().is_empty());
    }
}
