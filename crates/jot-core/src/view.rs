//! Derived view computation.
//!
//! Clients fetch the full note and category sets and recompute these views
//! on every relevant change (selection, search input, or a refetch). The
//! results are never persisted; at the data volumes a personal notebook
//! reaches, recomputing from scratch beats maintaining the views
//! incrementally.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Category, Note};

/// A category as shown in the folder sidebar, with its note count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderView {
    pub id: Uuid,
    pub name: String,
    pub note_count: usize,
}

/// Compute the folder sidebar model: one entry per category, counting the
/// notes that reference it. Categories with zero notes are retained.
pub fn folder_views(categories: &[Category], notes: &[Note]) -> Vec<FolderView> {
    categories
        .iter()
        .map(|category| FolderView {
            id: category.id,
            name: category.name.clone(),
            note_count: notes.iter().filter(|n| n.category_id == category.id).count(),
        })
        .collect()
}

/// Filter notes by the selected folder and a search query.
///
/// A note matches when it belongs to the selected folder (or no folder is
/// selected) and, case-insensitively, its title or content contains the
/// query (an empty query matches everything). Both predicates are ANDed.
pub fn filter_notes<'a>(notes: &'a [Note], selected: Option<Uuid>, query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| selected.map_or(true, |folder| note.category_id == folder))
        .filter(|note| {
            needle.is_empty()
                || note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
        })
        .collect()
}
