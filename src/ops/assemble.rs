//! Assembly of [`TaskItem`]s from raw query rows.
//!
//! Name and path resolution is batched: the distinct notebook and
//! document id sets are resolved once per fetch through the resolver's
//! cache, not once per task.

use std::collections::{HashMap, HashSet};

use crate::classify;
use crate::host::{HostApi, RawBlock};
use crate::model::{TaskItem, TaskStatus};
use crate::ops::notebooks::NotebookResolver;

/// Build one task from a row plus already-resolved metadata.
pub fn task_from_block(
    block: RawBlock,
    box_name: String,
    box_icon: String,
    doc_path: String,
    is_today: bool,
) -> TaskItem {
    let status = if classify::is_todo(&block.markdown) {
        TaskStatus::Todo
    } else {
        TaskStatus::Done
    };
    let priority = classify::detect_priority(&block.fcontent);
    TaskItem {
        id: block.id,
        markdown: block.markdown,
        content: block.content,
        fcontent: block.fcontent,
        box_id: block.box_id,
        box_name,
        box_icon,
        root_id: block.root_id,
        doc_path,
        created: block.created,
        updated: block.updated,
        block_type: block.block_type,
        subtype: block.subtype,
        status,
        priority,
        is_today,
    }
}

/// Build tasks from rows, resolving each distinct notebook and document
/// id exactly once.
pub async fn build_task_items(
    host: &dyn HostApi,
    resolver: &mut NotebookResolver,
    blocks: Vec<RawBlock>,
    today_ids: &HashSet<String>,
) -> Vec<TaskItem> {
    let box_ids: HashSet<String> = blocks.iter().map(|b| b.box_id.clone()).collect();
    let root_ids: HashSet<String> = blocks.iter().map(|b| b.root_id.clone()).collect();

    let mut box_names: HashMap<String, String> = HashMap::new();
    let mut box_icons: HashMap<String, String> = HashMap::new();
    for box_id in box_ids {
        let name = resolver.notebook_name(host, &box_id).await;
        let icon = resolver.notebook_icon(host, &box_id).await;
        box_names.insert(box_id.clone(), name);
        box_icons.insert(box_id, icon);
    }

    let mut doc_paths: HashMap<String, String> = HashMap::new();
    for root_id in root_ids {
        let path = resolver.document_path(host, &root_id).await;
        doc_paths.insert(root_id, path);
    }

    blocks
        .into_iter()
        .map(|block| {
            let box_name = box_names.get(&block.box_id).cloned().unwrap_or_default();
            let box_icon = box_icons.get(&block.box_id).cloned().unwrap_or_default();
            let doc_path = doc_paths.get(&block.root_id).cloned().unwrap_or_default();
            let is_today = today_ids.contains(&block.id);
            task_from_block(block, box_name, box_icon, doc_path, is_today)
        })
        .collect()
}
