//! Reactive settings store, persisted through host file I/O.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::host::{HostApi, HostError};
use crate::model::{DisplayMode, MIN_REFRESH_INTERVAL, PanelConfig, SortKey};
use crate::ops::today::STORAGE_BASE;

/// Settings file inside the plugin storage directory.
pub fn settings_path() -> String {
    format!("{STORAGE_BASE}/settings.json")
}

/// Observable settings container. Mutations go through named setters and
/// broadcast the full config to every subscriber.
pub struct ConfigStore {
    tx: watch::Sender<PanelConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(PanelConfig::default());
        ConfigStore { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelConfig> {
        self.tx.subscribe()
    }

    pub fn get(&self) -> PanelConfig {
        self.tx.borrow().clone()
    }

    pub fn set_auto_refresh(&self, value: bool) {
        self.tx.send_modify(|c| c.auto_refresh = value);
    }

    /// Clamped to [`MIN_REFRESH_INTERVAL`] before it is stored, so a
    /// too-small value never arms a fast timer.
    pub fn set_refresh_interval(&self, value: u64) {
        self.tx
            .send_modify(|c| c.refresh_interval = value.max(MIN_REFRESH_INTERVAL));
    }

    pub fn set_show_completed(&self, value: bool) {
        self.tx.send_modify(|c| c.show_completed = value);
    }

    pub fn set_max_tasks(&self, value: u32) {
        self.tx.send_modify(|c| c.max_tasks = value);
    }

    pub fn set_sort_by(&self, value: SortKey) {
        self.tx.send_modify(|c| c.sort_by = value);
    }

    pub fn set_display_mode(&self, value: DisplayMode) {
        self.tx.send_modify(|c| c.display_mode = value);
    }

    pub fn set_show_today_tasks(&self, value: bool) {
        self.tx.send_modify(|c| c.show_today_tasks = value);
    }

    /// Load persisted settings from the host. Missing or malformed data
    /// falls back to defaults without failing.
    pub async fn load(&self, host: &Arc<dyn HostApi>) {
        let loaded = match host.get_file(&settings_path()).await {
            Ok(bytes) => serde_json::from_slice::<PanelConfig>(&bytes).unwrap_or_else(|err| {
                warn!(%err, "malformed settings file, using defaults");
                PanelConfig::default()
            }),
            Err(err) => {
                warn!(%err, "no settings file, using defaults");
                PanelConfig::default()
            }
        };
        self.tx.send_modify(|c| {
            *c = loaded;
            c.refresh_interval = c.refresh_interval.max(MIN_REFRESH_INTERVAL);
        });
    }

    /// Persist the current settings through the host.
    pub async fn save(&self, host: &Arc<dyn HostApi>) -> Result<(), HostError> {
        let config = self.get();
        let data = serde_json::to_vec_pretty(&config)?;
        host.put_file(&settings_path(), data).await
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
