//! Service layer: the consistency and query operations over the
//! repositories.
//!
//! The repositories persist whatever they are handed; this layer is where
//! the note → category reference is validated (format first, existence
//! second) and where absence becomes a typed error. It never retries and
//! never logs — translating failures into responses is the transport's job.

pub mod category_service;
pub mod note_service;

pub use category_service::CategoryService;
pub use note_service::{NoteService, UpdateNoteInput};
