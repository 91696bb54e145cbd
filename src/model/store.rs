use thiserror::Error;

use crate::model::task::{DEFAULT_CATEGORY, Task, TaskId};

/// Errors from task store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("task description cannot be empty")]
    EmptyDescription,
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),
}

/// The in-memory task list.
///
/// Order is insertion order and doubles as display and file order. The store
/// never touches disk itself; `io::load_store` and `io::save_store` move it
/// in and out of the backing file.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// An empty store
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from deserialized tasks, numbering them from 1 in
    /// file order. Loaded data skips `add_task` validation on purpose:
    /// whatever strings the file holds are kept as-is.
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        for (index, task) in tasks.iter_mut().enumerate() {
            task.id = TaskId(index as u64 + 1);
        }
        let next_id = tasks.len() as u64 + 1;
        TaskStore { tasks, next_id }
    }

    /// Append a new pending task.
    ///
    /// Title and description must be non-empty after trimming; all three
    /// fields are stored trimmed. An empty category falls back to
    /// `DEFAULT_CATEGORY`. Returns the stored task with its assigned id.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        category: &str,
    ) -> Result<&Task, TaskError> {
        let title = title.trim();
        let description = description.trim();
        let category = category.trim();

        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        let category = if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };

        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            completed: false,
            id,
        });
        Ok(self.tasks.last().unwrap())
    }

    /// Mark the task with `id` completed.
    ///
    /// Completion is terminal: marking an already-completed task changes
    /// nothing and reports `AlreadyCompleted` so callers can tell the
    /// no-op apart from a real transition.
    pub fn mark_completed(&mut self, id: TaskId) -> Result<&Task, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        if task.completed {
            return Err(TaskError::AlreadyCompleted(id));
        }
        task.completed = true;
        Ok(task)
    }

    /// Remove the task with `id` and return it, keeping the order of the
    /// rest. Confirmation is the caller's job; the store deletes
    /// unconditionally.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Look up a task by id
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}
