//! Last-used filter persistence: one local JSON file, independent of the
//! host-stored settings.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::{DisplayMode, FilterState, TaskRange, TaskStatus};

const FILTER_FILE: &str = "filter-state.json";

#[derive(Debug, thiserror::Error)]
pub enum FilterStateError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode filter state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Loads and saves the last-used filter. Each field is validated on load
/// and falls back to its default individually, so one bad value does not
/// reset the rest.
pub struct FilterStore {
    path: PathBuf,
}

impl FilterStore {
    /// Store under the user config dir (`~/.config/taskdock` on Linux).
    pub fn new() -> Result<Self, FilterStateError> {
        let dir = dirs::config_dir()
            .ok_or(FilterStateError::NoConfigDir)?
            .join("taskdock");
        Ok(FilterStore {
            path: dir.join(FILTER_FILE),
        })
    }

    pub fn at_path(path: &Path) -> Self {
        FilterStore {
            path: path.to_path_buf(),
        }
    }

    pub fn load(&self) -> FilterState {
        let defaults = FilterState::default();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return defaults,
        };
        let parsed: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "malformed filter state file, using defaults");
                return defaults;
            }
        };

        FilterState {
            range: parsed["range"]
                .as_str()
                .and_then(TaskRange::parse)
                .unwrap_or(defaults.range),
            status: parsed["status"]
                .as_str()
                .and_then(TaskStatus::parse)
                .unwrap_or(defaults.status),
            display_mode: parsed["displayMode"]
                .as_str()
                .and_then(DisplayMode::parse)
                .unwrap_or(defaults.display_mode),
            timestamp: parsed["timestamp"].as_i64().unwrap_or(defaults.timestamp),
        }
    }

    /// Save the filter, stamping the current time.
    pub fn save(&self, state: &FilterState) -> Result<(), FilterStateError> {
        let stamped = FilterState {
            timestamp: chrono::Utc::now().timestamp_millis(),
            ..*state
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FilterStateError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(&stamped)?;
        fs::write(&self.path, json).map_err(|e| FilterStateError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn has_saved(&self) -> bool {
        self.path.exists()
    }

    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(%err, "failed to clear filter state");
            }
        }
    }
}
