use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::model::{TaskItem, TaskPriority, TaskRange, TaskStatus};

use super::app::{App, Row};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [title_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_title(frame, app, title_area);
    draw_list(frame, app, list_area);
    draw_status(frame, app, status_area);

    if app.show_help {
        draw_help(frame, app);
    }
}

fn range_label(app: &App, range: TaskRange) -> &str {
    match range {
        TaskRange::Doc => &app.strings.range_doc,
        TaskRange::Notebook => &app.strings.range_notebook,
        TaskRange::Workspace => &app.strings.range_workspace,
    }
}

fn status_label(app: &App, status: TaskStatus) -> &str {
    match status {
        TaskStatus::All => &app.strings.status_all,
        TaskStatus::Todo => &app.strings.status_todo,
        TaskStatus::Done => &app.strings.status_done,
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.strings.dock_title),
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "{} · {} · {}",
                range_label(app, app.state.range),
                status_label(app, app.state.status),
                app.task_count(),
            ),
            Style::default().fg(theme.dim),
        ),
    ];
    if app.state.loading {
        spans.push(Span::styled(
            format!("  {}", app.strings.loading),
            Style::default().fg(theme.highlight),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn priority_span<'a>(app: &App, task: &TaskItem) -> Span<'a> {
    let theme = &app.theme;
    match task.priority {
        TaskPriority::Urgent => Span::styled("‼ ", Style::default().fg(theme.urgent)),
        TaskPriority::High => Span::styled("! ", Style::default().fg(theme.high)),
        TaskPriority::Wait => Span::styled("~ ", Style::default().fg(theme.wait)),
        TaskPriority::Normal => Span::raw("  "),
    }
}

fn task_line<'a>(app: &App, task: &TaskItem, indent: usize, selected: bool) -> Line<'a> {
    let theme = &app.theme;
    let text_style = if task.status == TaskStatus::Done {
        Style::default()
            .fg(theme.done)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text)
    };

    let checkbox = if task.status == TaskStatus::Done {
        "[x] "
    } else {
        "[ ] "
    };

    let mut spans = vec![
        Span::raw(" ".repeat(indent + 1)),
        Span::styled(checkbox.to_string(), Style::default().fg(theme.dim)),
        priority_span(app, task),
    ];
    if task.is_today {
        spans.push(Span::styled(
            "★ ".to_string(),
            Style::default().fg(theme.today),
        ));
    }
    spans.push(Span::styled(
        crate::classify::extract_task_text(&task.fcontent),
        text_style,
    ));

    let mut line = Line::from(spans);
    if selected {
        line = line.style(Style::default().bg(theme.selection_bg));
    }
    line
}

fn draw_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height as usize;

    if app.rows.is_empty() {
        let theme = &app.theme;
        let message = if let Some(err) = &app.state.error {
            Line::styled(
                format!("{}: {err}", app.strings.error_prefix),
                Style::default().fg(theme.error),
            )
        } else if app.state.loading {
            Line::styled(app.strings.loading.clone(), Style::default().fg(theme.dim))
        } else {
            Line::styled(app.strings.no_tasks.clone(), Style::default().fg(theme.dim))
        };
        frame.render_widget(Paragraph::new(message), area);
        return;
    }

    // Keep the cursor in view.
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }

    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (i, row) in app.rows.iter().enumerate().skip(app.scroll).take(height) {
        let selected = i == app.cursor;
        let line = match row {
            Row::Notebook { name } => Line::styled(
                name.clone(),
                Style::default()
                    .fg(theme.group)
                    .add_modifier(Modifier::BOLD),
            ),
            Row::Document { path } => {
                Line::styled(format!("  {path}"), Style::default().fg(theme.dim))
            }
            Row::Task(task) => {
                let indent = match app.config.display_mode {
                    crate::model::DisplayMode::OnlyTasks => 0,
                    crate::model::DisplayMode::NotebookTasks => 2,
                    crate::model::DisplayMode::NotebookDocumentTasks => 4,
                };
                task_line(app, task, indent, selected)
            }
        };
        lines.push(line);
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let auto = if app.config.auto_refresh {
        &app.strings.auto_refresh_on
    } else {
        &app.strings.auto_refresh_off
    };
    let mut spans = vec![Span::styled(
        format!(" {auto} · {}", app.strings.help_hint),
        Style::default().fg(theme.dim),
    )];
    if let Some(err) = &app.state.error {
        spans.push(Span::styled(
            format!("  {}: {err}", app.strings.error_prefix),
            Style::default().fg(theme.error),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

const HELP_LINES: &[&str] = &[
    "j/k, arrows  move",
    "r            refresh now",
    "t            toggle today flag",
    "f            cycle range",
    "c            cycle status filter",
    "g            cycle grouping",
    "s            cycle sort key",
    "d            show/hide completed",
    "a            toggle auto-refresh",
    "q            quit",
];

fn draw_help(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let width = HELP_LINES
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0) as u16
        + 4;
    let height = HELP_LINES.len() as u16 + 2;
    let area = center_rect(frame.area(), width, height);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|l| Line::styled(*l, Style::default().fg(theme.text)))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
