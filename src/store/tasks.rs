//! Task list store: the panel's single in-memory task state, refreshed
//! through the smart-refresh path.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, error};

use crate::host::{HostApi, HostError};
use crate::model::{BoxContext, DocContext, PanelConfig, TaskItem, TaskRange, TaskStatus};
use crate::ops::assemble;
use crate::ops::notebooks::NotebookResolver;
use crate::ops::process;
use crate::ops::today;
use crate::query;

/// Full task panel state, broadcast wholesale on every change.
#[derive(Debug, Clone, Default)]
pub struct TaskPanelState {
    pub tasks: Vec<TaskItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub doc: DocContext,
    pub notebook: BoxContext,
    pub range: TaskRange,
    pub status: TaskStatus,
}

pub struct TaskStore {
    host: Arc<dyn HostApi>,
    state: watch::Sender<TaskPanelState>,
    config: watch::Receiver<PanelConfig>,
    resolver: Mutex<NotebookResolver>,
    /// Bumped at the start of every refresh; a refresh whose generation
    /// is no longer current discards its result instead of writing stale
    /// data over a newer one.
    generation: AtomicU64,
}

impl TaskStore {
    pub fn new(host: Arc<dyn HostApi>, config: watch::Receiver<PanelConfig>) -> Self {
        let (state, _) = watch::channel(TaskPanelState::default());
        TaskStore {
            host,
            state,
            config,
            resolver: Mutex::new(NotebookResolver::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskPanelState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TaskPanelState {
        self.state.borrow().clone()
    }

    /// Active document/notebook context, fed by the host's switch event
    /// (or explicit flags in the CLI rendition).
    pub fn set_context(&self, doc: DocContext, notebook: BoxContext) {
        self.state.send_modify(|s| {
            s.doc = doc;
            s.notebook = notebook;
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }

    /// Drop cached notebook names and document paths.
    pub async fn invalidate_metadata(&self) {
        self.resolver.lock().await.invalidate();
    }

    /// Smart refresh. `range`/`status` being `Some` marks a user-initiated
    /// call: it flips the loading flag and always applies the result.
    /// Background ticks (both `None`) apply only when something changed.
    pub async fn refresh_if_needed(
        &self,
        force: bool,
        range: Option<TaskRange>,
        status: Option<TaskStatus>,
    ) {
        let user_initiated = range.is_some() || status.is_some();
        let current = self.snapshot();
        let target_range = range.unwrap_or(current.range);
        let target_status = status.unwrap_or(current.status);

        if user_initiated {
            self.state.send_modify(|s| {
                s.loading = true;
                s.error = None;
                s.range = target_range;
                s.status = target_status;
            });
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.fetch_tasks(target_range, target_status).await {
            Ok(fresh) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!("discarding stale refresh result");
                    return;
                }
                let changed = process::has_tasks_changed(&current.tasks, &fresh);
                if force || user_initiated || changed {
                    self.state.send_modify(|s| {
                        s.tasks = fresh;
                        s.loading = false;
                    });
                } else if self.state.borrow().loading {
                    self.state.send_modify(|s| s.loading = false);
                }
                // A quiet background tick writes nothing, so subscribers
                // are not re-rendered for identical data.
            }
            Err(err) => {
                error!(%err, "task refresh failed");
                self.state.send_modify(|s| {
                    s.error = Some(err.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// Fetch and assemble the task list without touching the store.
    async fn fetch_tasks(
        &self,
        range: TaskRange,
        status: TaskStatus,
    ) -> Result<Vec<TaskItem>, HostError> {
        let current = self.snapshot();
        let limit = self.config.borrow().max_tasks;
        let rows = query::fetch_tasks(
            self.host.as_ref(),
            range,
            status,
            &current.doc,
            &current.notebook,
            limit,
        )
        .await?;

        let today_ids: HashSet<String> = today::load_today_ids(self.host.as_ref())
            .await
            .into_iter()
            .collect();

        let mut resolver = self.resolver.lock().await;
        Ok(assemble::build_task_items(self.host.as_ref(), &mut resolver, rows, &today_ids).await)
    }

    /// Toggle a task's today flag and patch the in-memory copy so the
    /// panel updates without a full refetch.
    pub async fn toggle_today(&self, task_id: &str) -> Result<bool, HostError> {
        let now_today = today::toggle(self.host.as_ref(), task_id).await?;
        self.state.send_modify(|s| {
            if let Some(task) = s.tasks.iter_mut().find(|t| t.id == task_id) {
                task.is_today = now_today;
            }
        });
        Ok(now_today)
    }
}
