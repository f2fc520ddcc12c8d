//! Command-line front end for the todo engine.
//!
//! # Responsibility
//! - Open the SQLite-backed slot and inject it into a `TodoStore`.
//! - Map one subcommand to one store operation and print the result.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use todo_core::db::open_db;
use todo_core::view::due::due_label;
use todo_core::{
    core_version, default_log_level, init_logging, Category, CategoryFilter, Clock,
    DueDateFilter, ExportFormat, FilterState, KeyValueStore, NewTodo, SortOption,
    SqliteKeyValueStore, StatusFilter, Todo, TodoPatch, TodoStore,
};

const DB_FILE_NAME: &str = "todos.sqlite3";
const DEFAULT_DATA_DIR: &str = ".todo-engine";

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Single-user todo list backed by a local slot store")]
struct Cli {
    /// Directory holding the database and logs.
    #[arg(long, env = "TODO_ENGINE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TODO_ENGINE_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a todo at the end of the manual order.
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value_t = Category::Personal)]
        category: Category,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Edit fields of an existing todo.
    Edit(EditArgs),
    /// Flip completion of a todo.
    Toggle { id: String },
    /// Delete a todo.
    Delete { id: String },
    /// Move a todo within the manual order (zero-based positions).
    Move { from: usize, to: usize },
    /// Delete every completed todo.
    ClearCompleted,
    /// List todos through the view filters.
    List(ListArgs),
    /// Print collection statistics.
    Stats,
    /// Export the whole collection.
    Export {
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
        /// Write into this directory using the dated download name.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<NaiveDate>,
    #[arg(long)]
    clear_due: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    #[arg(long, default_value = "all")]
    due: DueDateFilter,
    #[arg(long, default_value = "manual")]
    sort: SortOption,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir `{}`", data_dir.display()))?;

    let log_level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = data_dir.join("logs");
    if let Err(err) = init_logging(log_level, &log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let conn = open_db(data_dir.join(DB_FILE_NAME)).context("failed to open todo database")?;
    let mut store = TodoStore::open_default(SqliteKeyValueStore::new(&conn));

    run(&mut store, cli.command)
}

fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd.join(DEFAULT_DATA_DIR),
    })
}

fn run<S: KeyValueStore, C: Clock>(store: &mut TodoStore<S, C>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            title,
            description,
            category,
            due,
        } => {
            let request = NewTodo {
                title,
                description,
                category,
                due_date: due,
            };
            match store.create(request) {
                Some(todo) => println!("created {}", todo.id),
                None => bail!("title cannot be empty"),
            }
        }
        Command::Edit(args) => {
            let id = resolve_id(store, &args.id)?;
            let due_date = if args.clear_due {
                Some(None)
            } else {
                args.due.map(Some)
            };
            let patch = TodoPatch {
                title: args.title,
                description: args.description,
                category: args.category,
                due_date,
                ..TodoPatch::default()
            };
            if !store.update(&id, patch) {
                bail!("todo `{id}` was not updated (blank title?)");
            }
            println!("updated {id}");
        }
        Command::Toggle { id } => {
            let id = resolve_id(store, &id)?;
            store.toggle_completed(&id);
            let state = store
                .get(&id)
                .map_or("missing", |todo| if todo.completed { "completed" } else { "pending" });
            println!("{id} is now {state}");
        }
        Command::Delete { id } => {
            let id = resolve_id(store, &id)?;
            store.delete(&id);
            println!("deleted {id}");
        }
        Command::Move { from, to } => {
            if !store.reorder(from, to) {
                bail!("cannot move {from} -> {to} in a list of {}", store.len());
            }
            println!("moved {from} -> {to}");
        }
        Command::ClearCompleted => {
            println!("removed {} completed todo(s)", store.clear_completed());
        }
        Command::List(args) => {
            let filter = FilterState {
                category: args.category,
                status: args.status,
                due: args.due,
            };
            let today = store.today();
            for todo in store.filtered_view(&filter, args.sort) {
                println!("{}", list_line(todo, today));
            }
        }
        Command::Stats => {
            let stats = store.statistics();
            println!(
                "total={} completed={} pending={} overdue={} done={}%",
                stats.total,
                stats.completed,
                stats.pending,
                stats.overdue,
                stats.completion_percent()
            );
            for (category, count) in &stats.by_category {
                println!("  {} {category}: {count}", category.icon());
            }
        }
        Command::Export { format, output_dir } => {
            let content = store.export_snapshot(format)?;
            match output_dir {
                Some(dir) => {
                    let path = dir.join(format.file_name(store.today()));
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write `{}`", path.display()))?;
                    println!("exported {} to {}", format.mime_type(), path.display());
                }
                None => println!("{content}"),
            }
        }
    }
    Ok(())
}

/// Accepts a full id or a unique prefix of one.
fn resolve_id<S: KeyValueStore, C: Clock>(store: &TodoStore<S, C>, needle: &str) -> Result<String> {
    if store.get(needle).is_some() {
        return Ok(needle.to_string());
    }
    let matches: Vec<&Todo> = store
        .todos()
        .iter()
        .filter(|todo| todo.id.starts_with(needle))
        .collect();
    match matches.as_slice() {
        [todo] => Ok(todo.id.clone()),
        [] => bail!("no todo matches `{needle}`"),
        _ => bail!("`{needle}` matches {} todos; use a longer prefix", matches.len()),
    }
}

fn list_line(todo: &Todo, today: NaiveDate) -> String {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    let short_id: String = todo.id.chars().take(8).collect();
    let due = todo
        .due_date
        .map(|date| format!(" ({})", due_label(date, today)))
        .unwrap_or_default();
    format!(
        "{:>3} {check} {short_id} {} [{}]{due}",
        todo.order, todo.title, todo.category
    )
}
