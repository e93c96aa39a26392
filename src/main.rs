//! # kanban - Single-user task board
//!
//! A kanban board for one person: three fixed columns (pending,
//! in-progress, completed), a terminal UI for visual card movement, and a
//! CLI for scripted use. State lives in a local JSON file and survives
//! restarts.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive board
//! kanban board
//!
//! # Add a task via CLI
//! kanban add "Implement user authentication" --priority high
//!
//! # List tasks
//! kanban list
//!
//! # Move a task to another column
//! kanban mv 4 in-progress
//! ```
//!
//! ## Key Commands
//!
//! - `kanban board` - Launch the TUI board
//! - `kanban add <title>` - Create a new task
//! - `kanban list` - View tasks with status/priority/search filters
//! - `kanban update <id>` - Edit a task's fields
//! - `kanban mv <id> <status>` - Move a task between columns
//! - `kanban delete <id>` - Remove a task
//!
//! Data is stored in `~/.kanban/tasks.json` (override with `--db`). A
//! fresh board is seeded with three demonstration tasks.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod board;
    pub mod colors;
    pub mod form;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use storage::{JsonFileStorage, BOARD_FILE};
use store::Store;

fn main() {
    let cli = Cli::parse();

    // Determine the board file
    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let board_dir = PathBuf::from(home).join(".kanban");
        if let Err(e) = std::fs::create_dir_all(&board_dir) {
            eprintln!("Failed to create kanban directory {}: {}", board_dir.display(), e);
            std::process::exit(1);
        }
        board_dir.join(BOARD_FILE)
    });

    // Commands that manage their own store lifecycle
    match &cli.command {
        Commands::Board => {
            cmd_board(&db_path);
            return;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    let mut store = Store::new(Box::new(JsonFileStorage::new(db_path)));
    store.load_initial();

    match cli.command {
        Commands::Board | Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Add {
            title,
            desc,
            status,
            priority,
        } => cmd_add(&mut store, title, desc, status, priority),

        Commands::List {
            status,
            priority,
            search,
        } => cmd_list(&store, status, priority, search),

        Commands::View { id } => cmd_view(&store, id),

        Commands::Update {
            id,
            title,
            desc,
            status,
            priority,
        } => cmd_update(&mut store, id, title, desc, status, priority),

        Commands::Mv { id, status } => cmd_move(&mut store, id, status),

        Commands::Delete { id } => cmd_delete(&mut store, id),
    }
}
