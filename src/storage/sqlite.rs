//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::model::{ItemCounts, ItemId, ListId, TodoItem, TodoList};
use crate::validation::require_name;
use super::schema;

const SELECT_LIST: &str = "SELECT _id, name FROM todolist";
const SELECT_ITEM: &str = "SELECT _id, item_name, list_id, due_date, completed FROM todoitem";

enum Backing {
    /// A fresh connection is opened for every operation and closed before it returns
    File(PathBuf),
    /// In-memory databases vanish on close, so one connection lives as long as the store
    Memory(Connection),
}

/// SQLite-backed storage for lists and items
pub struct TodoStore {
    backing: Backing,
}

impl TodoStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self { backing: Backing::File(path.to_path_buf()) };
        store.with_conn("initialize_schema", initialize_schema)?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        initialize_schema(&conn)?;
        Ok(Self { backing: Backing::Memory(conn) })
    }

    /// Database file, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory(_) => None,
        }
    }

    /// Run one unit of work against a connection, logging store failures.
    fn with_conn<T>(&self, op: &str, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let result = match &self.backing {
            Backing::File(path) => run_scoped(path, f),
            Backing::Memory(conn) => f(conn),
        };

        if let Err(e) = &result {
            if e.is_fatal() {
                tracing::error!(operation = op, error = %e, "storage failure");
            }
        }
        result
    }

    // ========== List Operations ==========

    /// Create a list. Fails if the name is blank or already taken.
    pub fn create_list(&self, name: &str) -> Result<ListId> {
        require_name("List name", name)?;
        self.with_conn("create_list", |conn| {
            // Check and insert in one statement
            let inserted = conn.execute(
                r#"
                INSERT INTO todolist (name)
                SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM todolist WHERE name = ?1)
                "#,
                [name],
            )?;
            if inserted == 0 {
                return Err(Error::DuplicateName(name.to_string()));
            }

            let id = conn.last_insert_rowid();
            tracing::debug!(id, name, "created list");
            Ok(id)
        })
    }

    /// Rename a list. Keeping its current name is allowed.
    pub fn rename_list(&self, id: ListId, new_name: &str) -> Result<()> {
        require_name("List name", new_name)?;
        self.with_conn("rename_list", |conn| {
            let updated = conn.execute(
                r#"
                UPDATE todolist SET name = ?2
                WHERE _id = ?1
                  AND NOT EXISTS (SELECT 1 FROM todolist WHERE name = ?2 AND _id != ?1)
                "#,
                params![id, new_name],
            )?;
            if updated == 0 {
                return if list_exists(conn, id)? {
                    Err(Error::DuplicateName(new_name.to_string()))
                } else {
                    tracing::warn!(id, "no list renamed");
                    Err(Error::list_not_found(id))
                };
            }

            tracing::debug!(id, name = new_name, "renamed list");
            Ok(())
        })
    }

    /// Delete a list together with all of its items
    pub fn delete_list(&self, id: ListId) -> Result<()> {
        self.with_conn("delete_list", |conn| {
            let deleted = conn.execute("DELETE FROM todolist WHERE _id = ?1", [id])?;
            if deleted == 0 {
                tracing::warn!(id, "no list deleted");
                return Err(Error::list_not_found(id));
            }
            tracing::debug!(id, "deleted list");
            Ok(())
        })
    }

    /// Get a list by id
    pub fn get_list(&self, id: ListId) -> Result<Option<TodoList>> {
        self.with_conn("get_list", |conn| {
            conn.query_row(&format!("{SELECT_LIST} WHERE _id = ?1"), [id], row_to_list)
                .optional()
                .map_err(Into::into)
        })
    }

    /// All lists in insertion order
    pub fn list_all_lists(&self) -> Result<Vec<TodoList>> {
        self.with_conn("list_all_lists", |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_LIST} ORDER BY _id"))?;
            let lists = stmt
                .query_map([], row_to_list)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(lists)
        })
    }

    // ========== Item Operations ==========

    /// Add an open item to a list. The due date is stored verbatim.
    pub fn add_item(&self, list_id: ListId, name: &str, due_date: Option<&str>) -> Result<ItemId> {
        require_name("Item name", name)?;
        self.with_conn("add_item", |conn| {
            conn.execute(
                r#"
                INSERT INTO todoitem (item_name, due_date, list_id, completed)
                VALUES (?1, ?2, ?3, 0)
                "#,
                params![name, due_date, list_id],
            )
            .map_err(|e| missing_list_or(e, list_id))?;

            let id = conn.last_insert_rowid();
            tracing::debug!(id, list_id, name, "added item");
            Ok(id)
        })
    }

    /// Overwrite an item's name and due date
    pub fn edit_item(&self, id: ItemId, new_name: &str, new_due_date: Option<&str>) -> Result<()> {
        require_name("Item name", new_name)?;
        self.with_conn("edit_item", |conn| {
            let updated = conn.execute(
                "UPDATE todoitem SET item_name = ?2, due_date = ?3 WHERE _id = ?1",
                params![id, new_name, new_due_date],
            )?;
            expect_row(updated, id, "edit_item")
        })
    }

    /// Delete an item
    pub fn delete_item(&self, id: ItemId) -> Result<()> {
        self.with_conn("delete_item", |conn| {
            let deleted = conn.execute("DELETE FROM todoitem WHERE _id = ?1", [id])?;
            expect_row(deleted, id, "delete_item")
        })
    }

    /// Mark an item complete or open
    pub fn set_completed(&self, id: ItemId, completed: bool) -> Result<()> {
        self.with_conn("set_completed", |conn| {
            let updated = conn.execute(
                "UPDATE todoitem SET completed = ?2 WHERE _id = ?1",
                params![id, completed as i64],
            )?;
            expect_row(updated, id, "set_completed")
        })
    }

    /// Move an item to another list. The target list must exist.
    pub fn move_item(&self, id: ItemId, new_list_id: ListId) -> Result<()> {
        self.with_conn("move_item", |conn| {
            let updated = conn
                .execute(
                    "UPDATE todoitem SET list_id = ?2 WHERE _id = ?1",
                    params![id, new_list_id],
                )
                .map_err(|e| missing_list_or(e, new_list_id))?;
            expect_row(updated, id, "move_item")
        })
    }

    /// Get an item by id
    pub fn get_item(&self, id: ItemId) -> Result<Option<TodoItem>> {
        self.with_conn("get_item", |conn| {
            let item = conn
                .query_row(&format!("{SELECT_ITEM} WHERE _id = ?1"), [id], row_to_item)
                .optional()?;
            Ok(item.flatten())
        })
    }

    /// All items across every list, in insertion order
    pub fn list_all_items(&self) -> Result<Vec<TodoItem>> {
        self.with_conn("list_all_items", |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_ITEM} ORDER BY _id"))?;
            let rows = stmt.query_map([], row_to_item)?;
            collect_items(rows)
        })
    }

    /// Items of one list, in insertion order
    pub fn items_for_list(&self, list_id: ListId) -> Result<Vec<TodoItem>> {
        self.with_conn("items_for_list", |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_ITEM} WHERE list_id = ?1 ORDER BY _id"))?;
            let rows = stmt.query_map([list_id], row_to_item)?;
            collect_items(rows)
        })
    }

    /// Total and completed item counts for a list. Unknown lists count as empty.
    pub fn counts_for_list(&self, list_id: ListId) -> Result<ItemCounts> {
        self.with_conn("counts_for_list", |conn| {
            let (total, completed): (i64, i64) = conn.query_row(
                r#"
                SELECT COUNT(*), COALESCE(SUM(completed = 1), 0)
                FROM todoitem WHERE list_id = ?1
                "#,
                [list_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(ItemCounts {
                total: total as usize,
                completed: completed as usize,
            })
        })
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        self.with_conn("stats", |conn| {
            let (lists, items, completed): (i64, i64, i64) = conn.query_row(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM todolist),
                    (SELECT COUNT(*) FROM todoitem),
                    (SELECT COUNT(*) FROM todoitem WHERE completed = 1)
                "#,
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;
            Ok(StoreStats {
                lists: lists as usize,
                items: items as usize,
                completed: completed as usize,
            })
        })
    }
}

/// Open, use and close one connection. The connection is released on every path.
fn run_scoped<T>(path: &Path, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    let conn = Connection::open(path)?;
    let result = configure(&conn).and_then(|_| f(&conn));
    if let Err((_, e)) = conn.close() {
        tracing::warn!(error = %e, "failed to close connection");
    }
    result
}

/// Per-connection settings
fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

/// Create tables, rebuilding them when the stored schema is older than ours
fn initialize_schema(conn: &Connection) -> Result<()> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if version > schema::SCHEMA_VERSION {
        tracing::warn!(found = version, expected = schema::SCHEMA_VERSION, "database schema is newer than this build");
    } else if version != 0 && version < schema::SCHEMA_VERSION {
        tracing::warn!(from = version, to = schema::SCHEMA_VERSION, "upgrading schema, existing data is dropped");
        for stmt in schema::DROP_TABLES {
            conn.execute(stmt, [])?;
        }
    }

    for stmt in schema::all_schema_statements() {
        conn.execute(stmt, [])?;
    }

    if version < schema::SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", schema::SCHEMA_VERSION)?;
    }
    Ok(())
}

fn list_exists(conn: &Connection, id: ListId) -> Result<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM todolist WHERE _id = ?1", [id], |row| row.get(0))?;
    Ok(count > 0)
}

/// Turn a foreign key violation on `list_id` into a missing-list error
fn missing_list_or(err: rusqlite::Error, list_id: ListId) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            Error::list_not_found(list_id)
        }
        _ => err.into(),
    }
}

/// Mutations on a single item must touch exactly one row
fn expect_row(changed: usize, id: ItemId, op: &str) -> Result<()> {
    if changed == 0 {
        tracing::warn!(id, operation = op, "no item matched");
        return Err(Error::item_not_found(id));
    }
    tracing::debug!(id, operation = op, "item updated");
    Ok(())
}

/// Helper to convert a row to a TodoList
fn row_to_list(row: &rusqlite::Row) -> rusqlite::Result<TodoList> {
    Ok(TodoList {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Helper to convert a row to a TodoItem. Rows without a list are skipped.
fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Option<TodoItem>> {
    let id: ItemId = row.get(0)?;
    let Some(list_id) = row.get::<_, Option<ListId>>(2)? else {
        tracing::warn!(id, "skipping item without a list");
        return Ok(None);
    };
    let completed: Option<i64> = row.get(4)?;
    Ok(Some(TodoItem {
        id,
        name: row.get(1)?,
        list_id,
        due_date: row.get(3)?,
        completed: completed.unwrap_or(0) == 1,
    }))
}

fn collect_items(
    rows: impl Iterator<Item = rusqlite::Result<Option<TodoItem>>>,
) -> Result<Vec<TodoItem>> {
    let mut items = Vec::new();
    for row in rows {
        if let Some(item) = row? {
            items.push(item);
        }
    }
    Ok(items)
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub lists: usize,
    pub items: usize,
    pub completed: usize,
}

impl StoreStats {
    /// Item totals across every list
    pub fn item_counts(&self) -> ItemCounts {
        ItemCounts {
            total: self.items,
            completed: self.completed,
        }
    }
}
