//! End-to-end: fetched blocks plus today flags through the store, then
//! sorted and grouped the way the panel displays them.

mod common;

use std::sync::Arc;

use common::{FakeHost, block};
use pretty_assertions::assert_eq;
use taskdock::host::HostApi;
use taskdock::model::{ALL_DOCS_KEY, DisplayMode, SortKey, TaskRange, TaskStatus, TaskView};
use taskdock::ops::{process, today};
use taskdock::store::{ConfigStore, TaskStore};

#[tokio::test]
async fn today_flags_reach_assembled_tasks() {
    let host = Arc::new(
        FakeHost::new()
            .with_notebook("nb1", "Work", "")
            .with_doc("doc1", "/Inbox"),
    );
    host.set_blocks(vec![
        block("t1", "- [ ] flagged", "nb1", "doc1"),
        block("t2", "- [ ] plain", "nb1", "doc1"),
    ]);
    today::add(host.as_ref(), "t1").await.unwrap();

    let config = ConfigStore::new();
    let store = TaskStore::new(host.clone() as Arc<dyn HostApi>, config.subscribe());
    store
        .refresh_if_needed(false, Some(TaskRange::Workspace), Some(TaskStatus::All))
        .await;

    let state = store.snapshot();
    assert!(state.tasks.iter().find(|t| t.id == "t1").unwrap().is_today);
    assert!(!state.tasks.iter().find(|t| t.id == "t2").unwrap().is_today);
}

#[tokio::test]
async fn toggle_today_patches_in_memory_list() {
    let host = Arc::new(FakeHost::new().with_notebook("nb1", "Work", ""));
    host.set_blocks(vec![block("t1", "- [ ] task", "nb1", "doc1")]);

    let config = ConfigStore::new();
    let store = TaskStore::new(host.clone() as Arc<dyn HostApi>, config.subscribe());
    store
        .refresh_if_needed(false, Some(TaskRange::Workspace), Some(TaskStatus::All))
        .await;

    assert!(store.toggle_today("t1").await.unwrap());
    assert!(store.snapshot().tasks[0].is_today);

    assert!(!store.toggle_today("t1").await.unwrap());
    assert!(!store.snapshot().tasks[0].is_today);
}

#[tokio::test]
async fn sorted_grouped_panel_view() {
    let host = Arc::new(
        FakeHost::new()
            .with_notebook("nb1", "Work", "")
            .with_notebook("nb2", "Home", "")
            .with_doc("doc1", "/Projects")
            .with_doc("doc2", "/Chores"),
    );
    let mut urgent = block("t1", "- [ ] ‼️ pay invoice", "nb2", "doc2");
    urgent.fcontent = "‼️ pay invoice".to_string();
    let mut high = block("t2", "- [ ] ❗ fix login", "nb1", "doc1");
    high.fcontent = "❗ fix login".to_string();
    let normal = block("t3", "- [ ] tidy desk", "nb2", "doc2");
    host.set_blocks(vec![normal.clone(), urgent.clone(), high.clone()]);

    let config = ConfigStore::new();
    let store = TaskStore::new(host.clone() as Arc<dyn HostApi>, config.subscribe());
    store
        .refresh_if_needed(false, Some(TaskRange::Workspace), Some(TaskStatus::All))
        .await;
    let tasks = store.snapshot().tasks;

    let sorted = process::sort_tasks(&tasks, SortKey::Priority);
    let ids: Vec<_> = sorted.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);

    let view = process::group_tasks(sorted, DisplayMode::NotebookTasks);
    let TaskView::Grouped(groups) = view else {
        panic!("expected grouped view");
    };
    // Insertion order follows the sorted list: nb2 (urgent) first.
    let names: Vec<_> = groups.values().map(|g| g.notebook.as_str()).collect();
    assert_eq!(names, vec!["Home", "Work"]);
    assert_eq!(groups["nb2"].documents[ALL_DOCS_KEY].tasks.len(), 2);
}
