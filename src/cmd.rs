//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers behind the CLI
//! subcommands, from basic CRUD operations to launching the board TUI.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::path::Path;

use crate::fields::{Priority, Status};
use crate::filter::ViewFilter;
use crate::store::{format_priority, format_status, Store};
use crate::task::{Task, TaskDraft};
use crate::tui::run::run_board;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive kanban board.
    Board,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Column: pending | in-progress | completed.
        #[arg(long, value_enum, default_value_t = Status::Pending)]
        status: Status,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List tasks with optional filters.
    List {
        /// Filter by column.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Case-insensitive substring match on title or description.
        #[arg(long, default_value = "")]
        search: String,
    },

    /// View a single task by ID.
    View {
        /// Task ID to view.
        id: u64,
    },

    /// Update fields on a task.
    Update {
        /// Task ID to update.
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// Move a task to another column.
    Mv {
        /// Task ID to move.
        id: u64,
        /// Target column.
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID to delete.
        id: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the board terminal user interface.
pub fn cmd_board(db_path: &Path) {
    if let Err(e) = run_board(db_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the board.
pub fn cmd_add(store: &mut Store, title: String, desc: String, status: Status, priority: Priority) {
    let draft = TaskDraft {
        title,
        description: desc,
        status,
        priority,
    };
    match store.create(draft) {
        Ok(task) => println!("Added task {}", task.id),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// List tasks through the view filter.
pub fn cmd_list(store: &Store, status: Option<Status>, priority: Option<Priority>, search: String) {
    let view = ViewFilter {
        status,
        priority,
        search,
    };
    print_table(&view.apply(store.tasks()));
}

/// View detailed information about a specific task.
pub fn cmd_view(store: &Store, id: u64) {
    let Some(task) = store.get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Status:       {}", format_status(task.status));
    println!("Priority:     {}", format_priority(task.priority));
    println!("Created UTC:  {}", task.created_at.to_rfc3339());
    println!(
        "Description:\n{}\n",
        if task.description.is_empty() {
            "-"
        } else {
            task.description.as_str()
        }
    );
}

/// Update an existing task's fields. Flags left out keep their current
/// values.
pub fn cmd_update(
    store: &mut Store,
    id: u64,
    title: Option<String>,
    desc: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
) {
    let Some(current) = store.get(id).cloned() else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    let draft = TaskDraft {
        title: title.unwrap_or(current.title),
        description: desc.unwrap_or(current.description),
        status: status.unwrap_or(current.status),
        priority: priority.unwrap_or(current.priority),
    };
    match store.update(id, draft) {
        Ok(task) => println!("Updated task {}", task.id),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Move a task to another column.
pub fn cmd_move(store: &mut Store, id: u64, status: Status) {
    if store.get(id).is_none() {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    }
    store.change_status(id, status);
    println!("Moved task {} to {}", id, format_status(status));
}

/// Delete a task. Unknown ids are accepted silently.
pub fn cmd_delete(store: &mut Store, id: u64) {
    store.delete(id);
    println!("Deleted task {}", id);
}

/// Generate shell completion scripts for the given shell.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<5} {:<12} {:<7} {:<17} {}",
        "ID", "Status", "Pri", "Created", "Title"
    );
    for t in tasks {
        println!(
            "{:<5} {:<12} {:<7} {:<17} {}",
            t.id,
            format_status(t.status),
            format_priority(t.priority),
            t.created_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&t.title, 60),
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
