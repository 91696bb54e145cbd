use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store_io::{self, LoadOutcome};
use crate::model::store::TaskStore;
use crate::model::task::{CATEGORIES, TaskId};

use super::input;
use super::render;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Add,
    ConfirmDelete,
}

/// Which field of the add form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Description,
    Category,
}

impl AddField {
    pub fn next(self) -> AddField {
        match self {
            AddField::Title => AddField::Description,
            AddField::Description => AddField::Category,
            AddField::Category => AddField::Title,
        }
    }

    pub fn prev(self) -> AddField {
        match self {
            AddField::Title => AddField::Category,
            AddField::Description => AddField::Title,
            AddField::Category => AddField::Description,
        }
    }
}

/// State of the add-task form
#[derive(Debug)]
pub struct AddForm {
    pub title: String,
    pub description: String,
    /// Index into `CATEGORIES`; the form offers the fixed set only
    pub category: usize,
    pub focus: AddField,
}

impl AddForm {
    pub fn new() -> Self {
        AddForm {
            title: String::new(),
            description: String::new(),
            // Start on Uncategorized, the last entry
            category: CATEGORIES.len() - 1,
            focus: AddField::Title,
        }
    }

    /// The category the form currently points at
    pub fn category_name(&self) -> &'static str {
        CATEGORIES[self.category]
    }

    pub fn next_category(&mut self) {
        self.category = (self.category + 1) % CATEGORIES.len();
    }

    pub fn prev_category(&mut self) {
        self.category = (self.category + CATEGORIES.len() - 1) % CATEGORIES.len();
    }
}

impl Default for AddForm {
    fn default() -> Self {
        AddForm::new()
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub path: PathBuf,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the task list
    pub cursor: usize,
    /// Add form, present while `mode == Mode::Add`
    pub add_form: Option<AddForm>,
    /// Task awaiting delete confirmation
    pub pending_delete: Option<TaskId>,
    /// One-line feedback shown at the bottom
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TaskStore, path: PathBuf) -> Self {
        App {
            store,
            path,
            mode: Mode::Normal,
            should_quit: false,
            cursor: 0,
            add_form: None,
            pending_delete: None,
            status_message: None,
        }
    }

    /// Id of the task under the cursor
    pub fn selected_id(&self) -> Option<TaskId> {
        self.store.tasks().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the list after it shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(len - 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal lifecycle
// ---------------------------------------------------------------------------

/// Launch the interactive screen against the given store file
/// (`tasks.json` when `None`).
///
/// The store is written back exactly once, when the screen closes. A failed
/// exit save is reported after the terminal is restored and becomes the
/// process exit status; the session's edits are lost only in that case.
pub fn run(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = store_io::resolve_store_path(file);
    let LoadOutcome { store, warning } = store_io::load_store(&path);

    let mut app = App::new(store, path);
    if let Some(warning) = warning {
        app.status_message = Some(format!("warning: {}", warning));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // One save for the whole session, on the way out
    store_io::save_store(&app.path, &app.store)?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
