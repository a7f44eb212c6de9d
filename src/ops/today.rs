//! Per-task "today" flags.
//!
//! The kernel's block schema is not extensible, so the flag lives as one
//! JSON file per task id in the plugin storage directory:
//! `task-<id>.json` containing `{"isToday": true}`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::host::{HostApi, HostError};

/// Plugin-private storage directory inside the workspace data dir.
pub const STORAGE_BASE: &str = "/data/storage/petal/taskdock";

const FLAG_PREFIX: &str = "task-";
const FLAG_SUFFIX: &str = ".json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodayFlag {
    is_today: bool,
}

fn flag_path(task_id: &str) -> String {
    format!("{STORAGE_BASE}/{FLAG_PREFIX}{task_id}{FLAG_SUFFIX}")
}

/// Whether the task carries a valid today flag. Missing or malformed
/// files read as "not today".
pub async fn is_today(host: &dyn HostApi, task_id: &str) -> bool {
    match host.get_file(&flag_path(task_id)).await {
        Ok(bytes) => serde_json::from_slice::<TodayFlag>(&bytes)
            .map(|flag| flag.is_today)
            .unwrap_or(false),
        Err(_) => false,
    }
}

pub async fn add(host: &dyn HostApi, task_id: &str) -> Result<(), HostError> {
    let data = serde_json::to_vec(&TodayFlag { is_today: true })?;
    host.put_file(&flag_path(task_id), data).await?;
    debug!(task_id, "added today flag");
    Ok(())
}

pub async fn remove(host: &dyn HostApi, task_id: &str) -> Result<(), HostError> {
    host.remove_file(&flag_path(task_id)).await?;
    debug!(task_id, "removed today flag");
    Ok(())
}

/// Flip the flag; returns the new value.
pub async fn toggle(host: &dyn HostApi, task_id: &str) -> Result<bool, HostError> {
    if is_today(host, task_id).await {
        remove(host, task_id).await?;
        Ok(false)
    } else {
        add(host, task_id).await?;
        Ok(true)
    }
}

/// Scan the storage directory for valid flags and return the flagged task
/// ids. A missing directory means no today tasks; malformed files are
/// skipped. No reconciliation against the blocks table is attempted, so
/// flags for deleted tasks simply never match anything.
pub async fn load_today_ids(host: &dyn HostApi) -> Vec<String> {
    let entries = match host.read_dir(STORAGE_BASE).await {
        Ok(entries) => entries,
        Err(err) => {
            debug!(%err, "today storage directory not readable");
            return Vec::new();
        }
    };

    let mut ids = Vec::new();
    for entry in entries {
        if entry.is_dir
            || !entry.name.starts_with(FLAG_PREFIX)
            || !entry.name.ends_with(FLAG_SUFFIX)
        {
            continue;
        }
        let task_id = &entry.name[FLAG_PREFIX.len()..entry.name.len() - FLAG_SUFFIX.len()];
        match host.get_file(&format!("{STORAGE_BASE}/{}", entry.name)).await {
            Ok(bytes) => match serde_json::from_slice::<TodayFlag>(&bytes) {
                Ok(flag) if flag.is_today => ids.push(task_id.to_string()),
                Ok(_) => {}
                Err(_) => warn!(name = %entry.name, "skipping malformed today flag file"),
            },
            Err(err) => warn!(%err, name = %entry.name, "skipping unreadable today flag file"),
        }
    }
    ids
}

pub async fn count(host: &dyn HostApi) -> usize {
    load_today_ids(host).await.len()
}
