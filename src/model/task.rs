use std::fmt;

use serde::{Deserialize, Serialize};

/// Categories offered by the interactive UI, in display order
pub const CATEGORIES: [&str; 4] = ["Work", "Personal", "Urgent", "Uncategorized"];

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Identifier assigned to a task for the lifetime of a store.
///
/// Ids are handed out by the store in insertion order starting at 1. They are
/// not written to disk; a fresh load numbers the tasks again from the top.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate so width/alignment flags reach the number
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Short label shown in the task list
    pub title: String,
    /// Longer free-form text
    pub description: String,
    /// Grouping label; any text is accepted, the UI offers `CATEGORIES`
    pub category: String,
    /// Whether the task has been finished (completion is one-way)
    #[serde(default)]
    pub completed: bool,

    /// Store-assigned id, never persisted
    #[serde(skip)]
    pub id: TaskId,
}

impl Task {
    /// Status text shown next to a task
    pub fn status(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_completed_flag() {
        let mut task = Task {
            title: "Buy milk".into(),
            description: "2%, from the corner shop".into(),
            category: DEFAULT_CATEGORY.into(),
            completed: false,
            id: TaskId(1),
        };
        assert_eq!(task.status(), "Pending");
        task.completed = true;
        assert_eq!(task.status(), "Completed");
    }

    #[test]
    fn wire_form_has_exactly_four_fields() {
        let task = Task {
            title: "Buy milk".into(),
            description: "2%".into(),
            category: "Personal".into(),
            completed: false,
            id: TaskId(7),
        };
        let json = serde_json::to_value(&task).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("description"));
        assert!(obj.contains_key("category"));
        assert!(obj.contains_key("completed"));
    }

    #[test]
    fn id_display_honors_padding() {
        assert_eq!(TaskId(3).to_string(), "3");
        // Listing columns right-align the id
        assert_eq!(format!("{:>3}", TaskId(3)), "  3");
        assert_eq!(format!("{:>3}", TaskId(100)), "100");
    }

    #[test]
    fn missing_completed_defaults_to_pending() {
        let task: Task = serde_json::from_str(
            r#"{"title": "Old entry", "description": "from a previous version", "category": "Work"}"#,
        )
        .unwrap();
        assert!(!task.completed);
        assert_eq!(task.id, TaskId(0));
    }
}
