use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::store_io::{self, LoadOutcome};
use crate::model::store::{TaskError, TaskStore};
use crate::model::task::TaskId;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let path = store_io::resolve_store_path(cli.file.as_deref());

    match cli.command {
        None => {
            // Unreachable: main launches the TUI when no subcommand is given
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::List => cmd_list(&path, json),
            Commands::Show(args) => cmd_show(&path, args, json),
            Commands::Add(args) => cmd_add(&path, args, json),
            Commands::Done(args) => cmd_done(&path, args),
            Commands::Delete(args) => cmd_delete(&path, args),
        },
    }
}

/// Load the store, printing any load warning to stderr. A bad file is
/// reported once and the command proceeds on an empty store.
fn load_reporting(path: &Path) -> TaskStore {
    let LoadOutcome { store, warning } = store_io::load_store(path);
    if let Some(warning) = warning {
        eprintln!("warning: {}", warning);
    }
    store
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_reporting(path);

    if json {
        let tasks: Vec<output::TaskJson> = store.tasks().iter().map(output::task_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("no tasks");
    } else {
        for task in store.tasks() {
            println!("{}", output::task_line(task));
        }
    }
    Ok(())
}

fn cmd_show(path: &Path, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_reporting(path);
    let id = TaskId(args.id);
    let task = store.get(id).ok_or(TaskError::NotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output::task_to_json(task))?);
    } else {
        print!("{}", output::task_detail(task));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(path: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_reporting(path);

    let category = args.category.as_deref().unwrap_or("");
    let added = store.add_task(&args.title, &args.description, category)?;
    let id = added.id;
    let title = added.title.clone();
    let added_json = output::task_to_json(added);

    store_io::save_store(path, &store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&added_json)?);
    } else {
        println!("added task {}: \"{}\"", id, title);
    }
    Ok(())
}

fn cmd_done(path: &Path, args: DoneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_reporting(path);
    let id = TaskId(args.id);

    match store.mark_completed(id) {
        Ok(task) => {
            let title = task.title.clone();
            store_io::save_store(path, &store)?;
            println!("completed task {}: \"{}\"", id, title);
            Ok(())
        }
        // Benign no-op: say so and leave the file alone
        Err(TaskError::AlreadyCompleted(_)) => {
            println!("task {} is already completed", id);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_delete(path: &Path, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_reporting(path);
    let id = TaskId(args.id);

    let title = match store.get(id) {
        Some(task) => task.title.clone(),
        None => return Err(TaskError::NotFound(id).into()),
    };

    if !args.yes {
        // Interactive confirmation
        eprint!("Delete task {} \"{}\"? [y/n] ", id, title);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("cancelled");
            return Ok(());
        }
    }

    store.delete_task(id)?;
    store_io::save_store(path, &store)?;
    println!("deleted task {}: \"{}\"", id, title);
    Ok(())
}
