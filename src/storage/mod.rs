//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - todolist(_id, name)
//! - todoitem(_id, item_name, due_date, list_id, completed)

pub mod schema;
pub mod sqlite;

pub use sqlite::{StoreStats, TodoStore};
