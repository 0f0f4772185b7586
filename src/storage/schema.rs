//! Database schema definitions

/// Stored in `PRAGMA user_version`. Older versions are dropped and rebuilt.
pub const SCHEMA_VERSION: i32 = 5;

/// SQL to create the lists table
pub const CREATE_TODO_LIST_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todolist (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

/// SQL to create the items table
pub const CREATE_TODO_ITEM_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todoitem (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_name TEXT NOT NULL,
    due_date TEXT,
    list_id INTEGER,
    completed INTEGER DEFAULT 0,
    FOREIGN KEY(list_id) REFERENCES todolist(_id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_todolist_name ON todolist(name)",
    "CREATE INDEX IF NOT EXISTS idx_todoitem_list ON todoitem(list_id)",
];

/// Items first so the foreign key never points at a missing table
pub const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS todoitem",
    "DROP TABLE IF EXISTS todolist",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_TODO_LIST_TABLE, CREATE_TODO_ITEM_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
