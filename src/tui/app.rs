use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::debug;

use crate::host::HostApi;
use crate::io::FilterStore;
use crate::model::{
    BoxContext, DocContext, FilterState, PanelConfig, TaskItem, TaskView,
};
use crate::ops::process;
use crate::store::tasks::TaskPanelState;
use crate::store::{ConfigStore, I18nStore, Locale, Strings, TaskStore};

use super::input;
use super::render;
use super::theme::Theme;

/// One visible row of the panel.
#[derive(Debug, Clone)]
pub enum Row {
    /// Notebook group header.
    Notebook { name: String },
    /// Document sub-header inside a notebook group.
    Document { path: String },
    Task(TaskItem),
}

impl Row {
    pub fn is_task(&self) -> bool {
        matches!(self, Row::Task(_))
    }
}

/// Panel application state: the three stores plus view-local state.
pub struct App {
    pub host: Arc<dyn HostApi>,
    pub config_store: Arc<ConfigStore>,
    pub task_store: Arc<TaskStore>,
    pub strings: Strings,
    pub theme: Theme,

    /// Latest broadcast values.
    pub state: TaskPanelState,
    pub config: PanelConfig,

    /// Flattened display rows, rebuilt when state or config changes.
    pub rows: Vec<Row>,
    pub cursor: usize,
    pub scroll: usize,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        host: Arc<dyn HostApi>,
        config_store: Arc<ConfigStore>,
        task_store: Arc<TaskStore>,
        strings: Strings,
    ) -> Self {
        let state = task_store.snapshot();
        let config = config_store.get();
        let mut app = App {
            host,
            config_store,
            task_store,
            strings,
            theme: Theme::default(),
            state,
            config,
            rows: Vec::new(),
            cursor: 0,
            scroll: 0,
            show_help: false,
            should_quit: false,
        };
        app.rebuild_rows();
        app
    }

    /// Recompute the visible rows from the current state and config:
    /// completed-task filter, sort, group, flatten.
    pub fn rebuild_rows(&mut self) {
        let mut tasks = self.state.tasks.clone();
        if !self.config.show_completed {
            tasks.retain(|t| t.status != crate::model::TaskStatus::Done);
        }
        if !self.config.show_today_tasks {
            // Hiding today tasks is only about the marker, not the rows;
            // strip the flag so the marker disappears.
            for task in &mut tasks {
                task.is_today = false;
            }
        }
        let tasks = process::sort_tasks(&tasks, self.config.sort_by);
        let view = process::group_tasks(tasks, self.config.display_mode);

        self.rows.clear();
        match view {
            TaskView::Flat(tasks) => {
                self.rows.extend(tasks.into_iter().map(Row::Task));
            }
            TaskView::Grouped(groups) => {
                for group in groups.into_values() {
                    self.rows.push(Row::Notebook {
                        name: format!("{} {}", group.icon, group.notebook),
                    });
                    for doc in group.documents.into_values() {
                        if !doc.doc_path.is_empty() {
                            self.rows.push(Row::Document { path: doc.doc_path });
                        }
                        self.rows.extend(doc.tasks.into_iter().map(Row::Task));
                    }
                }
            }
        }

        if self.rows.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len() - 1;
        }
        self.snap_cursor_to_task(1);
    }

    /// Move the cursor onto a task row, scanning in `dir` (+1/-1) and
    /// bouncing off the ends.
    pub fn snap_cursor_to_task(&mut self, dir: isize) {
        if self.rows.iter().all(|r| !r.is_task()) {
            return;
        }
        let len = self.rows.len() as isize;
        let mut i = self.cursor as isize;
        while i >= 0 && i < len && !self.rows[i as usize].is_task() {
            i += dir;
        }
        if i < 0 || i >= len {
            i = self.cursor as isize;
            while i >= 0 && i < len && !self.rows[i as usize].is_task() {
                i -= dir;
            }
        }
        if i >= 0 && i < len {
            self.cursor = i as usize;
        }
    }

    pub fn selected_task(&self) -> Option<&TaskItem> {
        match self.rows.get(self.cursor) {
            Some(Row::Task(task)) => Some(task),
            _ => None,
        }
    }

    /// Count of tasks currently shown.
    pub fn task_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_task()).count()
    }
}

/// Run the panel until quit. Wires up stores, the input thread, and the
/// auto-refresh timer.
pub async fn run(
    host: Arc<dyn HostApi>,
    context: (DocContext, BoxContext),
) -> Result<(), Box<dyn std::error::Error>> {
    let locale = std::env::var("LANG").map(|l| Locale::from_tag(&l)).unwrap_or(Locale::En);
    let i18n = I18nStore::new(locale);
    let strings = i18n.get();

    let config_store = Arc::new(ConfigStore::new());
    config_store.load(&host).await;

    let task_store = Arc::new(TaskStore::new(host.clone(), config_store.subscribe()));
    task_store.set_context(context.0, context.1);

    // Reopen with the last-used filter.
    let filter_store = FilterStore::new().ok();
    let saved = filter_store
        .as_ref()
        .map(|s| s.load())
        .unwrap_or_default();
    config_store.set_display_mode(saved.display_mode);
    task_store
        .refresh_if_needed(true, Some(saved.range), Some(saved.status))
        .await;

    let mut app = App::new(host, config_store, task_store, strings);
    app.state = app.task_store.snapshot();
    app.config = app.config_store.get();
    app.rebuild_rows();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist the filter the panel was left on.
    if let Some(store) = &filter_store {
        let state = app.task_store.snapshot();
        let _ = store.save(&FilterState {
            range: state.range,
            status: state.status,
            display_mode: app.config.display_mode,
            timestamp: 0,
        });
    }

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    // Crossterm events come from a blocking reader thread.
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if key_tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });

    let mut state_rx = app.task_store.subscribe();
    let mut config_rx = app.config_store.subscribe();
    let mut period = Duration::from_secs(app.config.effective_refresh_interval());
    let mut next_tick = Instant::now() + period;

    loop {
        terminal.draw(|frame| render::draw(frame, app))?;

        tokio::select! {
            key = key_rx.recv() => {
                let Some(key) = key else { break };
                input::handle_key(app, key).await;
            }
            changed = state_rx.changed() => {
                if changed.is_ok() {
                    app.state = state_rx.borrow_and_update().clone();
                    app.rebuild_rows();
                }
            }
            changed = config_rx.changed() => {
                if changed.is_ok() {
                    app.config = config_rx.borrow_and_update().clone();
                    app.rebuild_rows();
                    // Interval may have changed; re-arm the timer.
                    period = Duration::from_secs(app.config.effective_refresh_interval());
                    next_tick = Instant::now() + period;
                }
            }
            _ = tokio::time::sleep_until(next_tick) => {
                next_tick = Instant::now() + period;
                if app.config.auto_refresh {
                    debug!("auto-refresh tick");
                    app.task_store.refresh_if_needed(false, None, None).await;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
