//! Todolist CLI - command-line front-end for local to-do lists

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use todolist::{config, ui, ItemId, ListId, TodoStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(version)]
#[command(about = "Local to-do lists with due-date tracking")]
#[command(long_about = r#"
Todolist keeps named lists of dated items in a local SQLite database and
flags lists with overdue items or items due today.

Example usage:
  todolist add-list Groceries
  todolist add-item 1 "Buy milk" --due 2030-01-15
  todolist done 1
  todolist lists
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file pointing at the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show every list with its completion and due-date status
    Lists,

    /// Show items, optionally only those of one list
    Items {
        /// List id
        #[arg(short, long)]
        list: Option<ListId>,
    },

    /// Create a list
    AddList {
        name: String,
    },

    /// Rename a list
    RenameList {
        id: ListId,
        name: String,
    },

    /// Delete a list and all of its items
    DeleteList {
        id: ListId,
    },

    /// Add an item to a list
    AddItem {
        list: ListId,
        name: String,

        /// Due date (YYYY-MM-DD), today or later
        #[arg(long)]
        due: Option<String>,
    },

    /// Change an item's name and due date
    EditItem {
        id: ItemId,
        name: String,

        /// New due date (YYYY-MM-DD); the current one is kept when omitted
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Delete an item
    DeleteItem {
        id: ItemId,
    },

    /// Mark an item complete
    Done {
        id: ItemId,
    },

    /// Mark an item open again
    Undone {
        id: ItemId,
    },

    /// Move an item to another list
    MoveItem {
        id: ItemId,
        list: ListId,
    },

    /// Show statistics about the database
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

pub fn emit_success(mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn emit_error(mode: OutputMode, err: &anyhow::Error) {
    match mode {
        OutputMode::Human => ui::error(&err.to_string()),
        OutputMode::Json => {
            let kind = match err.downcast_ref::<todolist::Error>() {
                Some(todolist::Error::Validation(_)) | Some(todolist::Error::InvalidDate(_)) => "validation",
                Some(todolist::Error::DuplicateName(_)) => "duplicate_name",
                Some(todolist::Error::NotFound { .. }) => "not_found",
                Some(todolist::Error::Storage(_)) | Some(todolist::Error::Io(_)) => "storage",
                None => "other",
            };
            let envelope = serde_json::json!({
                "ok": false,
                "error": { "kind": kind, "message": err.to_string() },
            });
            println!("{}", envelope);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    match run(cli, mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            emit_error(mode, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let base = std::env::current_dir()?;
    let rewriting_config = matches!(cli.command, Commands::Init { force: true });
    let database = config::resolve_database(cli.database.as_deref(), &config_path, &base, rewriting_config)?;

    let open_store = || -> anyhow::Result<TodoStore> {
        config::ensure_db_dir(&database)?;
        tracing::debug!("Opening database {:?}", database);
        Ok(TodoStore::open(&database)?)
    };

    match cli.command {
        Commands::Init { force } => commands::run_init(mode, &config_path, &database, force),
        Commands::Lists => commands::run_lists(&open_store()?, mode),
        Commands::Items { list } => commands::run_items(&open_store()?, mode, list),
        Commands::AddList { name } => commands::run_add_list(&open_store()?, mode, &name),
        Commands::RenameList { id, name } => commands::run_rename_list(&open_store()?, mode, id, &name),
        Commands::DeleteList { id } => commands::run_delete_list(&open_store()?, mode, id),
        Commands::AddItem { list, name, due } => {
            commands::run_add_item(&open_store()?, mode, list, &name, due.as_deref())
        }
        Commands::EditItem { id, name, due, clear_due } => {
            commands::run_edit_item(&open_store()?, mode, id, &name, due.as_deref(), clear_due)
        }
        Commands::DeleteItem { id } => commands::run_delete_item(&open_store()?, mode, id),
        Commands::Done { id } => commands::run_set_completed(&open_store()?, mode, id, true),
        Commands::Undone { id } => commands::run_set_completed(&open_store()?, mode, id, false),
        Commands::MoveItem { id, list } => commands::run_move_item(&open_store()?, mode, id, list),
        Commands::Stats => commands::run_stats(&open_store()?, mode),
    }
}
