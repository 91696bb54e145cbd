use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub completed: bool,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.0,
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category.clone(),
        completed: task.completed,
    }
}

// ---------------------------------------------------------------------------
// Text output helpers
// ---------------------------------------------------------------------------

/// One listing line:
/// ` 1 [ ] Buy milk - 2% from the corner shop (Personal) Pending`
pub fn task_line(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!(
        "{:>3} [{}] {} - {} ({}) {}",
        task.id,
        mark,
        task.title,
        task.description,
        task.category,
        task.status()
    )
}

/// Multi-line detail block for `tsk show`
pub fn task_detail(task: &Task) -> String {
    format!(
        "id:          {}\n\
         title:       {}\n\
         description: {}\n\
         category:    {}\n\
         status:      {}\n",
        task.id,
        task.title,
        task.description,
        task.category,
        task.status()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskId;

    fn sample_task() -> Task {
        Task {
            title: "Buy milk".into(),
            description: "2% from the corner shop".into(),
            category: "Personal".into(),
            completed: false,
            id: TaskId(3),
        }
    }

    #[test]
    fn line_shows_pending_task() {
        let line = task_line(&sample_task());
        assert_eq!(
            line,
            "  3 [ ] Buy milk - 2% from the corner shop (Personal) Pending"
        );
    }

    #[test]
    fn line_shows_completed_task() {
        let mut task = sample_task();
        task.completed = true;
        let line = task_line(&task);
        assert!(line.contains("[x]"));
        assert!(line.ends_with("Completed"));
    }

    #[test]
    fn detail_spells_out_status() {
        let detail = task_detail(&sample_task());
        assert!(detail.contains("status:      Pending"));
        assert!(detail.contains("title:       Buy milk"));
    }

    #[test]
    fn json_shape_carries_the_id() {
        let json = serde_json::to_value(task_to_json(&sample_task())).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["completed"], false);
    }
}
