//! Error types for jot.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using jot's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jot operations.
///
/// The validation and store layers produce these variants directly; callers
/// switch on the variant tag, never on message contents.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A supplied identifier is not in the format the store requires
    #[error("Invalid identifier: \"{0}\"")]
    InvalidReference(String),

    /// A category reference is well-formed but resolves to no record
    #[error("Referenced category does not exist: {0}")]
    ReferenceNotFound(Uuid),

    /// A required field is missing or fails validation
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    /// Category not found
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Category still has notes referencing it
    #[error("Category {0} still has notes and cannot be deleted")]
    CategoryInUse(Uuid),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
