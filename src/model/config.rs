use serde::{Deserialize, Serialize};

use crate::model::task::DisplayMode;

/// Floor for the auto-refresh interval, in seconds. Settings below this
/// are clamped up before a timer is armed.
pub const MIN_REFRESH_INTERVAL: u64 = 5;

/// Sort key for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Created,
    Updated,
    Priority,
    Content,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Priority => "priority",
            SortKey::Content => "content",
        }
    }

    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "created" => Some(SortKey::Created),
            "updated" => Some(SortKey::Updated),
            "priority" => Some(SortKey::Priority),
            "content" => Some(SortKey::Content),
            _ => None,
        }
    }
}

/// User-configurable panel settings, persisted as one JSON blob in the
/// plugin storage directory. Every field has a serde default so a partial
/// or stale settings file degrades field-wise instead of failing load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    pub auto_refresh: bool,
    /// Seconds between background refreshes; see [`MIN_REFRESH_INTERVAL`].
    pub refresh_interval: u64,
    pub show_completed: bool,
    /// Row limit for task queries.
    pub max_tasks: u32,
    pub sort_by: SortKey,
    pub display_mode: DisplayMode,
    pub show_today_tasks: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            auto_refresh: false,
            refresh_interval: 30,
            show_completed: true,
            max_tasks: 2000,
            sort_by: SortKey::Created,
            display_mode: DisplayMode::OnlyTasks,
            show_today_tasks: true,
        }
    }
}

impl PanelConfig {
    /// The interval actually used for the timer, clamped to the floor.
    pub fn effective_refresh_interval(&self) -> u64 {
        self.refresh_interval.max(MIN_REFRESH_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PanelConfig::default();
        assert!(!config.auto_refresh);
        assert_eq!(config.refresh_interval, 30);
        assert!(config.show_completed);
        assert_eq!(config.max_tasks, 2000);
        assert_eq!(config.sort_by, SortKey::Created);
        assert_eq!(config.display_mode, DisplayMode::OnlyTasks);
    }

    #[test]
    fn test_interval_floor() {
        let config = PanelConfig {
            refresh_interval: 2,
            ..PanelConfig::default()
        };
        assert_eq!(config.effective_refresh_interval(), 5);

        let config = PanelConfig {
            refresh_interval: 30,
            ..PanelConfig::default()
        };
        assert_eq!(config.effective_refresh_interval(), 30);
    }

    #[test]
    fn test_partial_json_falls_back_per_field() {
        let config: PanelConfig =
            serde_json::from_str(r#"{"autoRefresh": true, "maxTasks": 500}"#).unwrap();
        assert!(config.auto_refresh);
        assert_eq!(config.max_tasks, 500);
        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.sort_by, SortKey::Created);
    }

    #[test]
    fn test_round_trip_keys_are_camel_case() {
        let json = serde_json::to_string(&PanelConfig::default()).unwrap();
        assert!(json.contains("\"autoRefresh\""));
        assert!(json.contains("\"displayMode\""));
        assert!(json.contains("\"only-tasks\""));
    }
}
