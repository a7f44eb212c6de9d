use serde::{Deserialize, Serialize};

use crate::model::task::{DisplayMode, TaskRange, TaskStatus};

/// Last-used panel filter, persisted locally (independent of the
/// host-stored settings) so the panel reopens where the user left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub range: TaskRange,
    pub status: TaskStatus,
    pub display_mode: DisplayMode,
    /// Unix millis of the last save.
    pub timestamp: i64,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            range: TaskRange::Workspace,
            status: TaskStatus::All,
            display_mode: DisplayMode::OnlyTasks,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
