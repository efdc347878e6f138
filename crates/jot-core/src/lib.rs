//! # jot-core
//!
//! Core types, traits, and abstractions for jot.
//!
//! This crate provides the entity models, the typed error set, the
//! repository traits implemented by the storage backends, and the derived
//! view computations shared with clients. It performs no I/O of its own.

pub mod error;
pub mod ids;
pub mod models;
pub mod traits;
pub mod view;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use ids::{new_id, parse_id};
pub use models::*;
pub use traits::*;
pub use view::{filter_notes, folder_views, FolderView};
