use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed kanban board CLI.
/// Storage defaults to ~/.kanban/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "kanban", version, about = "Single-user kanban task board")]
pub struct Cli {
    /// Path to the JSON board file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
