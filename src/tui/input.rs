use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::model::{DisplayMode, SortKey, TaskRange, TaskStatus};

use super::app::App;

/// Handle one key press in the panel.
pub async fn handle_key(app: &mut App, key: KeyEvent) {
    if app.show_help {
        // Any key closes the help overlay.
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Home => {
            app.cursor = 0;
            app.snap_cursor_to_task(1);
        }
        KeyCode::End => {
            app.cursor = app.rows.len().saturating_sub(1);
            app.snap_cursor_to_task(-1);
        }

        // Force refresh, regardless of change detection. Also drops the
        // metadata caches so notebook renames show up.
        KeyCode::Char('r') => {
            app.task_store.invalidate_metadata().await;
            app.task_store.refresh_if_needed(true, None, None).await;
        }

        // Toggle today flag on the selected task.
        KeyCode::Char('t') => {
            if let Some(task) = app.selected_task() {
                let id = task.id.clone();
                if let Err(err) = app.task_store.toggle_today(&id).await {
                    warn!(%err, "failed to toggle today flag");
                    app.task_store.set_error(Some(err.to_string()));
                }
            }
        }

        // Filter cycling; range/status go through the user-initiated
        // refresh path so they always apply.
        KeyCode::Char('f') => {
            let next = next_range(app.state.range);
            app.task_store.refresh_if_needed(false, Some(next), None).await;
        }
        KeyCode::Char('c') => {
            let next = next_status(app.state.status);
            app.task_store.refresh_if_needed(false, None, Some(next)).await;
        }
        KeyCode::Char('g') => {
            app.config_store.set_display_mode(next_display_mode(app.config.display_mode));
            persist_config(app).await;
        }
        KeyCode::Char('s') => {
            app.config_store.set_sort_by(next_sort(app.config.sort_by));
            persist_config(app).await;
        }
        KeyCode::Char('a') => {
            app.config_store.set_auto_refresh(!app.config.auto_refresh);
            persist_config(app).await;
        }
        KeyCode::Char('d') => {
            app.config_store.set_show_completed(!app.config.show_completed);
            persist_config(app).await;
        }

        _ => {}
    }
}

/// Every settings change is written back immediately, so the next launch
/// picks it up.
async fn persist_config(app: &App) {
    if let Err(err) = app.config_store.save(&app.host).await {
        warn!(%err, "failed to persist settings");
    }
}

fn move_cursor(app: &mut App, dir: isize) {
    if app.rows.is_empty() {
        return;
    }
    let len = app.rows.len() as isize;
    let mut i = app.cursor as isize + dir;
    while i >= 0 && i < len && !app.rows[i as usize].is_task() {
        i += dir;
    }
    if i >= 0 && i < len {
        app.cursor = i as usize;
    }
}

fn next_range(range: TaskRange) -> TaskRange {
    match range {
        TaskRange::Workspace => TaskRange::Notebook,
        TaskRange::Notebook => TaskRange::Doc,
        TaskRange::Doc => TaskRange::Workspace,
    }
}

fn next_status(status: TaskStatus) -> TaskStatus {
    match status {
        TaskStatus::All => TaskStatus::Todo,
        TaskStatus::Todo => TaskStatus::Done,
        TaskStatus::Done => TaskStatus::All,
    }
}

fn next_display_mode(mode: DisplayMode) -> DisplayMode {
    match mode {
        DisplayMode::OnlyTasks => DisplayMode::NotebookTasks,
        DisplayMode::NotebookTasks => DisplayMode::NotebookDocumentTasks,
        DisplayMode::NotebookDocumentTasks => DisplayMode::OnlyTasks,
    }
}

fn next_sort(sort: SortKey) -> SortKey {
    match sort {
        SortKey::Created => SortKey::Updated,
        SortKey::Updated => SortKey::Priority,
        SortKey::Priority => SortKey::Content,
        SortKey::Content => SortKey::Created,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_cover_all_variants() {
        let mut range = TaskRange::Workspace;
        for _ in 0..3 {
            range = next_range(range);
        }
        assert_eq!(range, TaskRange::Workspace);

        let mut sort = SortKey::Created;
        for _ in 0..4 {
            sort = next_sort(sort);
        }
        assert_eq!(sort, SortKey::Created);
    }
}
