//! Data model - lists and the items they contain
//!
//! Both records are plain snapshots of stored rows. Nothing here is cached;
//! callers re-read from [`crate::TodoStore`] after every write.

use serde::{Deserialize, Serialize};

/// Row id of a list
pub type ListId = i64;

/// Row id of an item
pub type ItemId = i64;

/// A named collection of items. Names are unique across all lists
/// (case-sensitive exact match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
}

/// A task entry belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: ItemId,
    pub name: String,
    pub list_id: ListId,
    /// `YYYY-MM-DD` as stored. The store keeps whatever text it was given,
    /// so readers must tolerate values that do not parse.
    pub due_date: Option<String>,
    pub completed: bool,
}

impl TodoItem {
    /// Stored due-date text, with blank values treated as absent
    pub fn due_date_str(&self) -> Option<&str> {
        self.due_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    /// Open items take part in due-date status; completed ones never do
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

/// Item totals for one list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
    pub total: usize,
    pub completed: usize,
}

impl ItemCounts {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(due: Option<&str>) -> TodoItem {
        TodoItem {
            id: 1,
            name: "task".to_string(),
            list_id: 1,
            due_date: due.map(str::to_string),
            completed: false,
        }
    }

    #[test]
    fn test_blank_due_date_is_absent() {
        assert_eq!(item(None).due_date_str(), None);
        assert_eq!(item(Some("")).due_date_str(), None);
        assert_eq!(item(Some("   ")).due_date_str(), None);
        assert_eq!(item(Some("2025-01-10")).due_date_str(), Some("2025-01-10"));
        assert_eq!(item(Some(" 2025-01-10 ")).due_date_str(), Some(" 2025-01-10 "));
    }

    #[test]
    fn test_remaining() {
        let counts = ItemCounts { total: 5, completed: 2 };
        assert_eq!(counts.remaining(), 3);
        assert_eq!(ItemCounts::default().remaining(), 0);
    }
}
