//! Core data models for jot.
//!
//! These types are shared across all jot crates and represent the two
//! domain entities: notes and the categories (folders) that organize them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder grouping notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A note. Every note belongs to exactly one category; the reference is
/// required at creation and is validated against the category set before
/// any write that sets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new note. The category reference has already been
/// format-checked and resolved by the caller.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
}

/// Partial update for a note. `None` leaves the stored value untouched;
/// `updated_at` is refreshed on every successful update regardless.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
}

impl NoteChanges {
    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category_id.is_none()
    }
}

/// Partial update for a category.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
}
