use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tsk", about = concat!("[x] tsk v", env!("CARGO_PKG_VERSION"), " - your to-do list in one file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different task file
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks
    List,
    /// Show one task in full
    Show(ShowArgs),
    /// Add a task
    Add(AddArgs),
    /// Mark a task completed
    Done(DoneArgs),
    /// Permanently delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task id, as printed by `tsk list`
    pub id: u64,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
    /// Category (defaults to Uncategorized)
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task id
    pub id: u64,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task id
    pub id: u64,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}
