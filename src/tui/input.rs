use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::store::TaskError;

use super::app::{AddField, AddForm, App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal(app, key),
        Mode::Add => handle_add(app, key),
        Mode::ConfirmDelete => handle_confirm(app, key),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('a') => {
            app.add_form = Some(AddForm::new());
            app.mode = Mode::Add;
            app.status_message = None;
        }
        KeyCode::Char('c') => complete_selected(app),
        KeyCode::Char('d') => request_delete(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    if app.store.is_empty() {
        return;
    }
    let last = app.store.len() - 1;
    app.cursor = if delta < 0 {
        app.cursor.saturating_sub(delta.unsigned_abs())
    } else {
        (app.cursor + delta as usize).min(last)
    };
}

fn complete_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    match app.store.mark_completed(id) {
        Ok(task) => {
            let msg = format!("completed \"{}\"", task.title);
            app.status_message = Some(msg);
        }
        Err(e @ TaskError::AlreadyCompleted(_)) => {
            app.status_message = Some(e.to_string());
        }
        Err(e) => {
            app.status_message = Some(format!("error: {}", e));
        }
    }
}

fn request_delete(app: &mut App) {
    if let Some(id) = app.selected_id() {
        app.pending_delete = Some(id);
        app.mode = Mode::ConfirmDelete;
    }
}

// ---------------------------------------------------------------------------
// Add mode
// ---------------------------------------------------------------------------

fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.add_form = None;
            app.mode = Mode::Normal;
            return;
        }
        KeyCode::Enter => {
            // Enter advances through the fields; on the last one it submits
            let on_last = app
                .add_form
                .as_ref()
                .is_some_and(|f| f.focus == AddField::Category);
            if on_last {
                submit_add(app);
            } else if let Some(form) = app.add_form.as_mut() {
                form.focus = form.focus.next();
            }
            return;
        }
        _ => {}
    }

    let Some(form) = app.add_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Backspace => match form.focus {
            AddField::Title => {
                form.title.pop();
            }
            AddField::Description => {
                form.description.pop();
            }
            AddField::Category => {}
        },
        KeyCode::Left if form.focus == AddField::Category => form.prev_category(),
        KeyCode::Right if form.focus == AddField::Category => form.next_category(),
        KeyCode::Char(c) => match form.focus {
            AddField::Title => form.title.push(c),
            AddField::Description => form.description.push(c),
            // Category is picked with Left/Right, not typed
            AddField::Category => {}
        },
        _ => {}
    }
}

fn submit_add(app: &mut App) {
    let Some(form) = app.add_form.take() else {
        return;
    };

    match app
        .store
        .add_task(&form.title, &form.description, form.category_name())
    {
        Ok(task) => {
            let msg = format!("added \"{}\"", task.title);
            app.status_message = Some(msg);
            app.mode = Mode::Normal;
        }
        Err(e) => {
            // Keep the form open so the field can be fixed
            app.status_message = Some(format!("error: {}", e));
            app.add_form = Some(form);
        }
    }
}

// ---------------------------------------------------------------------------
// Delete confirmation
// ---------------------------------------------------------------------------

fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let pending = app.pending_delete.take();
            app.mode = Mode::Normal;
            if let Some(id) = pending {
                match app.store.delete_task(id) {
                    Ok(task) => {
                        app.status_message = Some(format!("deleted \"{}\"", task.title));
                        app.clamp_cursor();
                    }
                    Err(e) => {
                        app.status_message = Some(format!("error: {}", e));
                    }
                }
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.pending_delete = None;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskId;
    use crate::tui::test_helpers::sample_app;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn cursor_moves_and_clamps() {
        let mut app = sample_app();
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 2);
        // Already at the bottom
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn add_flow_creates_task() {
        let mut app = sample_app();
        let before = app.store.len();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Add);
        type_str(&mut app, "Water plants");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "the one in the hallway too");
        press(&mut app, KeyCode::Enter);
        // Focus is now on category; pick the first entry
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), before + 1);
        let added = app.store.tasks().last().unwrap();
        assert_eq!(added.title, "Water plants");
        assert_eq!(added.category, "Work");
        assert!(!added.completed);
        assert_eq!(app.status_message.as_deref(), Some("added \"Water plants\""));
    }

    #[test]
    fn add_defaults_to_uncategorized() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "T");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "D");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks().last().unwrap().category, "Uncategorized");
    }

    #[test]
    fn add_with_blank_title_keeps_form_open() {
        let mut app = sample_app();
        let before = app.store.len();

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Add);
        assert!(app.add_form.is_some());
        assert_eq!(app.store.len(), before);
        assert_eq!(
            app.status_message.as_deref(),
            Some("error: task title cannot be empty")
        );
    }

    #[test]
    fn add_esc_cancels() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "half typed");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.add_form.is_none());
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn category_cycles_both_ways() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        let form = app.add_form.as_ref().unwrap();
        assert_eq!(form.focus, AddField::Category);
        assert_eq!(form.category_name(), "Uncategorized");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.add_form.as_ref().unwrap().category_name(), "Work");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.add_form.as_ref().unwrap().category_name(), "Urgent");
    }

    #[test]
    fn backspace_edits_focused_field() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "abc");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.add_form.as_ref().unwrap().title, "ab");
    }

    #[test]
    fn complete_marks_selected_task() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.store.get(TaskId(3)).unwrap().completed);
        assert_eq!(
            app.status_message.as_deref(),
            Some("completed \"Ship release\"")
        );
    }

    #[test]
    fn complete_twice_reports_benign_noop() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.status_message.as_deref(),
            Some("task 1 is already completed")
        );
        assert!(app.store.get(TaskId(1)).unwrap().completed);
    }

    #[test]
    fn complete_on_empty_list_is_a_noop() {
        let mut app = sample_app();
        app.store = crate::model::store::TaskStore::new();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::ConfirmDelete);
        assert_eq!(app.pending_delete, Some(TaskId(1)));
        // Nothing deleted yet
        assert_eq!(app.store.len(), 3);

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 2);
        assert!(app.store.get(TaskId(1)).is_none());
        assert_eq!(app.status_message.as_deref(), Some("deleted \"Buy milk\""));
    }

    #[test]
    fn delete_n_cancels() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 3);
        assert!(app.pending_delete.is_none());
    }

    #[test]
    fn delete_esc_cancels() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn delete_last_row_clamps_cursor() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn other_keys_ignored_in_confirm_mode() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, Mode::ConfirmDelete);
        assert_eq!(app.store.len(), 3);
    }
}
