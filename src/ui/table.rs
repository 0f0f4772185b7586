use crate::model::{TodoItem, TodoList};
use crate::status::{ListSummary, Urgency};
use crate::ui::Icons;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct ListRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "List")]
    pub name: String,
    #[tabled(rename = "Done")]
    pub done: String,
    #[tabled(rename = "%")]
    pub percent: String,
    #[tabled(rename = "Nearest Due")]
    pub nearest_due: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&ListSummary> for ListRow {
    fn from(summary: &ListSummary) -> Self {
        let status = match summary.urgency() {
            Urgency::Overdue => format!("{} {}", Icons::OVERDUE, Urgency::Overdue),
            Urgency::DueToday => format!("{} {}", Icons::DUE_TODAY, Urgency::DueToday),
            Urgency::Normal => String::new(),
        };
        Self {
            id: summary.list.id,
            name: summary.list.name.clone(),
            done: format!("{}/{}", summary.counts.completed, summary.counts.total),
            percent: format!("{:.0}%", summary.completion_ratio() * 100.0),
            nearest_due: summary
                .nearest_due
                .map(|d| d.to_string())
                .unwrap_or_else(|| "None".to_string()),
            status,
        }
    }
}

#[derive(Tabled)]
pub struct ItemRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "")]
    pub done: &'static str,
    #[tabled(rename = "Item")]
    pub name: String,
    #[tabled(rename = "List")]
    pub list: String,
    #[tabled(rename = "Due")]
    pub due: String,
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub fn lists_table(summaries: &[ListSummary]) -> String {
    if summaries.is_empty() {
        return String::new();
    }
    let rows: Vec<ListRow> = summaries.iter().map(ListRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Items with their list names resolved from `lists`
pub fn items_table(items: &[TodoItem], lists: &[TodoList]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let rows: Vec<ItemRow> = items
        .iter()
        .map(|item| ItemRow {
            id: item.id,
            done: if item.completed { Icons::DONE } else { Icons::OPEN },
            name: item.name.clone(),
            list: lists
                .iter()
                .find(|l| l.id == item.list_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| format!("#{}", item.list_id)),
            due: item.due_date.clone().unwrap_or_default(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let rows: Vec<TableRow> = stats
        .iter()
        .map(|(label, value)| TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        })
        .collect();
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemCounts;
    use chrono::NaiveDate;

    fn summary(overdue: bool, due_today: bool) -> ListSummary {
        ListSummary {
            list: TodoList { id: 3, name: "Chores".to_string() },
            counts: ItemCounts { total: 4, completed: 1 },
            nearest_due: NaiveDate::from_ymd_opt(2025, 6, 15),
            overdue,
            due_today,
        }
    }

    #[test]
    fn test_list_row() {
        let row = ListRow::from(&summary(true, true));
        assert_eq!(row.done, "1/4");
        assert_eq!(row.percent, "25%");
        assert_eq!(row.nearest_due, "2025-06-15");
        assert!(row.status.contains("overdue"));

        let row = ListRow::from(&summary(false, false));
        assert!(row.status.is_empty());
    }

    #[test]
    fn test_items_table_names_lists() {
        let lists = vec![TodoList { id: 1, name: "Home".to_string() }];
        let items = vec![TodoItem {
            id: 9,
            name: "Sweep".to_string(),
            list_id: 1,
            due_date: None,
            completed: false,
        }];
        let table = items_table(&items, &lists);
        assert!(table.contains("Sweep"));
        assert!(table.contains("Home"));
        assert!(items_table(&[], &lists).is_empty());
    }

    #[test]
    fn test_stats_table() {
        assert!(stats_table(&[]).is_empty());
        assert!(stats_table(&[("Lists", "2")]).contains("Lists"));
    }
}
