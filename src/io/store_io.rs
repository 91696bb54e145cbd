use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::model::store::TaskStore;
use crate::model::task::Task;

/// File name used when no store file is given
pub const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Errors from writing the store file
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not serialize task list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Why a load came back empty even though the file was there
#[derive(Debug, Error)]
pub enum LoadWarning {
    #[error("could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: io::Error,
    },
    #[error("{path} is not a valid task file, starting empty: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// What a load produced: always a usable store, plus an optional warning
pub struct LoadOutcome {
    pub store: TaskStore,
    /// Set when the file existed but could not be used. The bad file is
    /// left in place; the next save replaces it.
    pub warning: Option<LoadWarning>,
}

impl LoadOutcome {
    fn empty() -> Self {
        LoadOutcome {
            store: TaskStore::new(),
            warning: None,
        }
    }
}

/// Resolve the store file path from an optional override
pub fn resolve_store_path(file: Option<&Path>) -> PathBuf {
    match file {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_STORE_FILE),
    }
}

/// Load the task store from `path`.
///
/// This never fails: a missing file is a normal first run and yields an
/// empty store, and an unreadable or unparseable file yields an empty store
/// with a `LoadWarning` saying why. The file's task order becomes the
/// store's order.
pub fn load_store(path: &Path) -> LoadOutcome {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::empty(),
        Err(e) => {
            return LoadOutcome {
                store: TaskStore::new(),
                warning: Some(LoadWarning::Unreadable {
                    path: path.to_path_buf(),
                    source: e,
                }),
            };
        }
    };

    match serde_json::from_str::<Vec<Task>>(&text) {
        Ok(tasks) => LoadOutcome {
            store: TaskStore::from_tasks(tasks),
            warning: None,
        },
        Err(e) => LoadOutcome {
            store: TaskStore::new(),
            warning: Some(LoadWarning::Corrupt {
                path: path.to_path_buf(),
                source: e,
            }),
        },
    }
}

/// Write the whole store to `path`, replacing any existing file.
///
/// The in-memory store is untouched either way; on error the previous file
/// contents survive thanks to the atomic write.
pub fn save_store(path: &Path, store: &TaskStore) -> Result<(), SaveError> {
    let content = serde_json::to_string_pretty(store.tasks())?;
    atomic_write(path, content.as_bytes()).map_err(|e| SaveError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write content to a temp file in the same directory, then rename it over
/// `path`. A crash mid-write leaves the old file intact, never a truncated
/// one.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
