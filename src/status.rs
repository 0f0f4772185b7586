//! Status Engine - due-date status derived from item snapshots
//!
//! Everything here is a pure function of the items passed in and the
//! calendar day supplied by the caller. Nothing is stored.
//!
//! Only open items with a due date take part: completed items and items
//! whose due date is missing or blank are ignored by every check, so a fully
//! completed list never shows as overdue.
//!
//! A stored due date counts only when it is exactly `YYYY-MM-DD`. Any other
//! text, including unpadded or whitespace-wrapped dates, is ignored by all
//! three checks alike.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{ItemCounts, TodoItem, TodoList};
use crate::validation::{DATE_FORMAT, parse_stored_date};

/// Current calendar day in the local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Due-date text of open items, blanks skipped
fn open_due_dates<'a>(items: &'a [TodoItem]) -> impl Iterator<Item = &'a str> + 'a {
    items
        .iter()
        .filter(|item| item.is_open())
        .filter_map(TodoItem::due_date_str)
}

/// Parse a stored due date, logging and skipping text that is not a date
fn parsed(raw: &str) -> Option<NaiveDate> {
    let date = parse_stored_date(raw);
    if date.is_none() {
        tracing::warn!(due_date = raw, "skipping unparsable due date");
    }
    date
}

/// Soonest due date among open items, past dates included
pub fn nearest_due_date(items: &[TodoItem]) -> Option<NaiveDate> {
    open_due_dates(items).filter_map(parsed).min()
}

/// Whether any open item was due before `today`
pub fn has_overdue_items(items: &[TodoItem], today: NaiveDate) -> bool {
    open_due_dates(items)
        .filter_map(parsed)
        .any(|due| due < today)
}

/// Whether any open item is due on `today`.
///
/// Compares the stored text against `today` formatted as `YYYY-MM-DD`,
/// which accepts exactly the dates the other checks parse.
pub fn has_item_due_today(items: &[TodoItem], today: NaiveDate) -> bool {
    let today = today.format(DATE_FORMAT).to_string();
    open_due_dates(items).any(|due| due == today)
}

/// How urgently a list needs attention. Overdue wins over due-today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueToday,
    Normal,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::DueToday => "due today",
            Urgency::Normal => "ok",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a front-end shows for one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub list: TodoList,
    pub counts: ItemCounts,
    pub nearest_due: Option<NaiveDate>,
    pub overdue: bool,
    pub due_today: bool,
}

impl ListSummary {
    pub fn urgency(&self) -> Urgency {
        if self.overdue {
            Urgency::Overdue
        } else if self.due_today {
            Urgency::DueToday
        } else {
            Urgency::Normal
        }
    }

    /// Completed share in `0.0..=1.0`; an empty list counts as 0
    pub fn completion_ratio(&self) -> f64 {
        if self.counts.total == 0 {
            0.0
        } else {
            self.counts.completed as f64 / self.counts.total as f64
        }
    }
}

/// Summarize one list. `items` may hold items of other lists; they are ignored.
pub fn summarize(list: &TodoList, items: &[TodoItem], today: NaiveDate) -> ListSummary {
    let own: Vec<TodoItem> = items
        .iter()
        .filter(|item| item.list_id == list.id)
        .cloned()
        .collect();

    ListSummary {
        list: list.clone(),
        counts: ItemCounts {
            total: own.len(),
            completed: own.iter().filter(|item| item.completed).count(),
        },
        nearest_due: nearest_due_date(&own),
        overdue: has_overdue_items(&own, today),
        due_today: has_item_due_today(&own, today),
    }
}

/// Summarize every list, keeping list order
pub fn summarize_all(lists: &[TodoList], items: &[TodoItem], today: NaiveDate) -> Vec<ListSummary> {
    lists
        .iter()
        .map(|list| summarize(list, items, today))
        .collect()
}
