use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::store::TaskStore;
use crate::model::task::TaskId;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over three tasks, with the second one completed.
pub fn sample_app() -> App {
    let mut store = TaskStore::new();
    store.add_task("Buy milk", "2% from the corner shop", "Personal").unwrap();
    store.add_task("File taxes", "forms are in the drawer", "Urgent").unwrap();
    store.add_task("Ship release", "tag and publish", "Work").unwrap();
    store.mark_completed(TaskId(2)).unwrap();
    App::new(store, PathBuf::from("tasks.json"))
}

/// An app with no tasks at all.
pub fn empty_app() -> App {
    App::new(TaskStore::new(), PathBuf::from("tasks.json"))
}
