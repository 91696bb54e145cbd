use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use crate::model::task::Task;

use super::app::{AddField, AddForm, App, Mode};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: task table | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // task table
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_task_table(frame, app, chunks[0]);
    render_status_row(frame, app, chunks[1]);

    // Popups go on top of everything
    match app.mode {
        Mode::Add => {
            if let Some(form) = &app.add_form {
                render_add_popup(frame, form, area);
            }
        }
        Mode::ConfirmDelete => render_confirm_popup(frame, app, area),
        Mode::Normal => {}
    }
}

// ---------------------------------------------------------------------------
// Task table
// ---------------------------------------------------------------------------

fn render_task_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.path.display()));

    if app.store.is_empty() {
        let hint = Paragraph::new("no tasks yet - press a to add one")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let header = Row::new(
        ["Id", "Title", "Description", "Category", "Status"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    );

    let rows: Vec<Row> = app.store.tasks().iter().map(task_row).collect();

    let widths = [
        Constraint::Length(4),      // Id
        Constraint::Percentage(28), // Title
        Constraint::Min(20),        // Description
        Constraint::Length(13),     // Category
        Constraint::Length(9),      // Status
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn task_row(task: &Task) -> Row<'_> {
    let style = if task.completed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Row::new([
        Cell::from(task.id.to_string()),
        Cell::from(task.title.as_str()),
        Cell::from(task.description.as_str()),
        Cell::from(task.category.as_str()),
        Cell::from(task.status()),
    ])
    .style(style)
}

// ---------------------------------------------------------------------------
// Status row
// ---------------------------------------------------------------------------

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.status_message {
        Some(msg) => (msg.clone(), Style::default()),
        None => {
            let hints = match app.mode {
                Mode::Normal => "a add  c complete  d delete  j/k move  q quit",
                Mode::Add => "Enter next/submit  Tab field  Left/Right category  Esc cancel",
                Mode::ConfirmDelete => "y delete  n keep",
            };
            (hints.to_string(), Style::default().fg(Color::DarkGray))
        }
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

// ---------------------------------------------------------------------------
// Popups
// ---------------------------------------------------------------------------

fn render_add_popup(frame: &mut Frame, form: &AddForm, area: Rect) {
    let popup_area = centered_rect_fixed(46, 11, area);
    frame.render_widget(Clear, popup_area);

    let outer = Block::default().borders(Borders::ALL).title(" add task ");
    let inner = outer.inner(popup_area);
    frame.render_widget(outer, popup_area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    render_form_field(frame, fields[0], "title", &form.title, form.focus == AddField::Title, true);
    render_form_field(
        frame,
        fields[1],
        "description",
        &form.description,
        form.focus == AddField::Description,
        true,
    );
    let category = format!("< {} >", form.category_name());
    render_form_field(
        frame,
        fields[2],
        "category",
        &category,
        form.focus == AddField::Category,
        false,
    );
}

fn render_form_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    editable: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    // Text cursor on the focused editable field
    let text = if focused && editable {
        format!("{}\u{258c}", value)
    } else {
        value.to_string()
    };
    let field = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label.to_string()),
    );
    frame.render_widget(field, area);
}

fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .pending_delete
        .and_then(|id| app.store.get(id))
        .map(|t| t.title.as_str())
        .unwrap_or("?");

    let popup_area = centered_rect_fixed(44, 4, area);
    frame.render_widget(Clear, popup_area);

    let text = format!("Delete \"{}\"?\n[y]es  [n]o", title);
    let popup = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" confirm "),
    );
    frame.render_widget(popup, popup_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
