//! # Todolist - local to-do lists with due-date tracking
//!
//! The core shared by every front-end:
//! - SQLite-backed storage for named lists and the dated items inside them
//! - A stateless status engine deriving counts, nearest due date and
//!   overdue / due-today flags from item snapshots
//! - Input validation applied at the front-end boundary

pub mod model;
pub mod storage;
pub mod status;
pub mod validation;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{ItemCounts, ItemId, ListId, TodoItem, TodoList};
pub use status::{ListSummary, Urgency};
pub use storage::TodoStore;

/// Result type alias for Todolist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Todolist operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A list named '{0}' already exists")]
    DuplicateName(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn list_not_found(id: ListId) -> Self {
        Error::NotFound { entity: "List", id }
    }

    pub(crate) fn item_not_found(id: ItemId) -> Self {
        Error::NotFound { entity: "Item", id }
    }

    /// True for failures of the underlying store, as opposed to rejected input
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }
}
