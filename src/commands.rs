use crate::{emit_success, OutputMode};
use owo_colors::OwoColorize;
use std::path::Path;
use todolist::config::{self, TodolistConfig};
use todolist::ui::{self, theme, Icons};
use todolist::{status, validation, ItemId, ListId, TodoStore};

pub fn run_init(output_mode: OutputMode, config_path: &Path, database: &Path, force: bool) -> anyhow::Result<()> {
    let config = TodolistConfig {
        database: Some(database.display().to_string()),
    };
    config::write_config(config_path, &config, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", config_path.display()));
        ui::info("Database", &database.display().to_string());
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "config": config_path.display().to_string(),
            "database": database.display().to_string(),
        }))?;
    }
    Ok(())
}

/// Re-read every list and item and render the overview
pub fn run_lists(store: &TodoStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let lists = store.list_all_lists()?;
    let items = store.list_all_items()?;
    let summaries = status::summarize_all(&lists, &items, status::today());

    if !output_mode.is_human() {
        return emit_success(output_mode, "lists", serde_json::to_value(&summaries)?);
    }

    if summaries.is_empty() {
        println!("{} No lists yet. Create one with `todolist add-list <NAME>`.", Icons::LIST);
        return Ok(());
    }

    ui::header(Icons::LIST, "Lists");
    println!("{}", ui::lists_table(&summaries));

    for summary in &summaries {
        let (icon, note) = match summary.urgency() {
            todolist::Urgency::Overdue => (Icons::OVERDUE, "has overdue items"),
            todolist::Urgency::DueToday => (Icons::DUE_TODAY, "has items due today"),
            todolist::Urgency::Normal => continue,
        };
        let line = format!("{} {}", summary.list.name, note);
        println!("{} {}", icon, line.style(ui::urgency_style(summary.urgency())));
    }
    Ok(())
}

pub fn run_items(store: &TodoStore, output_mode: OutputMode, list: Option<ListId>) -> anyhow::Result<()> {
    let items = match list {
        Some(id) => {
            if store.get_list(id)?.is_none() {
                return Err(todolist::Error::NotFound { entity: "List", id }.into());
            }
            store.items_for_list(id)?
        }
        None => store.list_all_items()?,
    };

    if !output_mode.is_human() {
        return emit_success(output_mode, "items", serde_json::to_value(&items)?);
    }

    if items.is_empty() {
        println!("{}", ui::muted("No items."));
        return Ok(());
    }

    let lists = store.list_all_lists()?;
    ui::header(Icons::CALENDAR, "Items");
    println!("{}", ui::items_table(&items, &lists));
    Ok(())
}

pub fn run_add_list(store: &TodoStore, output_mode: OutputMode, name: &str) -> anyhow::Result<()> {
    let id = store.create_list(name)?;
    confirm(store, output_mode, "add-list", Icons::NEW, &format!("Created list '{}' (#{})", name, id), serde_json::json!({ "id": id }))
}

pub fn run_rename_list(store: &TodoStore, output_mode: OutputMode, id: ListId, name: &str) -> anyhow::Result<()> {
    store.rename_list(id, name)?;
    confirm(store, output_mode, "rename-list", Icons::EDIT, &format!("Renamed list #{} to '{}'", id, name), serde_json::json!({ "id": id }))
}

pub fn run_delete_list(store: &TodoStore, output_mode: OutputMode, id: ListId) -> anyhow::Result<()> {
    store.delete_list(id)?;
    confirm(store, output_mode, "delete-list", Icons::DEL, &format!("Deleted list #{} and its items", id), serde_json::json!({ "id": id }))
}

pub fn run_add_item(
    store: &TodoStore,
    output_mode: OutputMode,
    list: ListId,
    name: &str,
    due: Option<&str>,
) -> anyhow::Result<()> {
    let due = validation::parse_due_date(due, status::today())?;
    let id = store.add_item(list, name, due.as_deref())?;
    confirm(store, output_mode, "add-item", Icons::NEW, &format!("Added '{}' (#{}) to list #{}", name, id, list), serde_json::json!({ "id": id }))
}

pub fn run_edit_item(
    store: &TodoStore,
    output_mode: OutputMode,
    id: ItemId,
    name: &str,
    due: Option<&str>,
    clear_due: bool,
) -> anyhow::Result<()> {
    let current = store
        .get_item(id)?
        .ok_or(todolist::Error::NotFound { entity: "Item", id })?;
    let due = validation::resolve_edited_due_date(current.due_date.as_deref(), due, clear_due, status::today())?;

    store.edit_item(id, name, due.as_deref())?;
    confirm(store, output_mode, "edit-item", Icons::EDIT, &format!("Updated item #{}", id), serde_json::json!({ "id": id }))
}

pub fn run_delete_item(store: &TodoStore, output_mode: OutputMode, id: ItemId) -> anyhow::Result<()> {
    store.delete_item(id)?;
    confirm(store, output_mode, "delete-item", Icons::DEL, &format!("Deleted item #{}", id), serde_json::json!({ "id": id }))
}

pub fn run_set_completed(store: &TodoStore, output_mode: OutputMode, id: ItemId, completed: bool) -> anyhow::Result<()> {
    store.set_completed(id, completed)?;
    let (command, icon, verb) = if completed {
        ("done", Icons::DONE, "complete")
    } else {
        ("undone", Icons::OPEN, "open")
    };
    confirm(store, output_mode, command, icon, &format!("Marked item #{} {}", id, verb), serde_json::json!({ "id": id, "completed": completed }))
}

pub fn run_move_item(store: &TodoStore, output_mode: OutputMode, id: ItemId, list: ListId) -> anyhow::Result<()> {
    store.move_item(id, list)?;
    confirm(store, output_mode, "move-item", Icons::MOVE, &format!("Moved item #{} to list #{}", id, list), serde_json::json!({ "id": id, "list_id": list }))
}

pub fn run_stats(store: &TodoStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = store.stats()?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "stats", serde_json::to_value(stats)?);
    }

    let database = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    ui::header(Icons::STATS, "Todolist Statistics");
    println!("{} {}", Icons::DATABASE, ui::dim(&database));
    let lists = stats.lists.to_string();
    let items = stats.items.to_string();
    let completed = stats.completed.to_string();
    let open = stats.item_counts().remaining().to_string();
    println!(
        "{}",
        ui::stats_table(&[
            ("Lists", lists.as_str()),
            ("Items", items.as_str()),
            ("Completed", completed.as_str()),
            ("Open", open.as_str()),
        ])
    );
    Ok(())
}

/// Report a finished write, then re-read and show the lists overview
fn confirm(
    store: &TodoStore,
    output_mode: OutputMode,
    command: &str,
    icon: &str,
    message: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if !output_mode.is_human() {
        return emit_success(output_mode, command, data);
    }

    if !todolist::output::is_quiet() {
        println!("{} {}", icon, message.style(theme().success.clone()));
        println!();
    }
    run_lists(store, output_mode)
}
