//! Change detection, sorting, and grouping over assembled task lists.

use indexmap::IndexMap;

use crate::classify;
use crate::model::{
    ALL_DOCS_KEY, DisplayMode, DocumentGroup, GroupedTasks, NotebookGroup, SortKey, TaskItem,
    TaskView,
};

/// Whether a freshly fetched list differs from the current one. Length
/// first, then pairwise id/markdown/status/priority/updated in order.
pub fn has_tasks_changed(current: &[TaskItem], fresh: &[TaskItem]) -> bool {
    if current.len() != fresh.len() {
        return true;
    }
    current.iter().zip(fresh).any(|(a, b)| {
        a.id != b.id
            || a.markdown != b.markdown
            || a.status != b.status
            || a.priority != b.priority
            || a.updated != b.updated
    })
}

/// Sort a task list by the given key. All sorts are stable.
pub fn sort_tasks(tasks: &[TaskItem], key: SortKey) -> Vec<TaskItem> {
    let mut sorted = tasks.to_vec();
    match key {
        SortKey::Priority => {
            sorted.sort_by_key(|t| t.priority.rank());
        }
        SortKey::Updated => {
            sorted.sort_by(|a, b| b.updated.cmp(&a.updated));
        }
        SortKey::Content => {
            sorted.sort_by_cached_key(|t| classify::extract_task_text(&t.markdown).to_lowercase());
        }
        SortKey::Created => {
            sorted.sort_by(|a, b| a.created.cmp(&b.created));
        }
    }
    sorted
}

/// Group tasks for display. `OnlyTasks` returns the input unchanged;
/// the grouped modes build an insertion-ordered notebook → document map.
pub fn group_tasks(tasks: Vec<TaskItem>, mode: DisplayMode) -> TaskView {
    if mode == DisplayMode::OnlyTasks {
        return TaskView::Flat(tasks);
    }

    let mut groups: GroupedTasks = IndexMap::new();
    for task in tasks {
        let notebook = groups
            .entry(task.box_id.clone())
            .or_insert_with(|| NotebookGroup {
                notebook: task.box_name.clone(),
                icon: task.box_icon.clone(),
                documents: IndexMap::new(),
            });

        let (doc_key, doc_path) = match mode {
            DisplayMode::NotebookDocumentTasks => {
                let path = if task.doc_path.is_empty() {
                    "Unknown Document".to_string()
                } else {
                    task.doc_path.clone()
                };
                (task.root_id.clone(), path)
            }
            _ => (ALL_DOCS_KEY.to_string(), String::new()),
        };

        notebook
            .documents
            .entry(doc_key)
            .or_insert_with(|| DocumentGroup {
                doc_path,
                tasks: Vec::new(),
            })
            .tasks
            .push(task);
    }

    TaskView::Grouped(groups)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{TaskPriority, TaskStatus};

    fn task(id: &str) -> TaskItem {
        TaskItem {
            id: id.to_string(),
            markdown: format!("- [ ] task {id}"),
            content: format!("task {id}"),
            fcontent: format!("task {id}"),
            box_id: "nb1".to_string(),
            box_name: "Notebook One".to_string(),
            box_icon: "🗃".to_string(),
            root_id: "doc1".to_string(),
            doc_path: "Inbox".to_string(),
            created: "20240101000000".to_string(),
            updated: "20240102000000".to_string(),
            block_type: "i".to_string(),
            subtype: "t".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Normal,
            is_today: false,
        }
    }

    #[test]
    fn test_empty_lists_have_not_changed() {
        assert!(!has_tasks_changed(&[], &[]));
    }

    #[test]
    fn test_length_change_detected() {
        assert!(has_tasks_changed(&[], &[task("a")]));
    }

    #[test]
    fn test_field_changes_detected() {
        let base = vec![task("a"), task("b")];

        let mut status = base.clone();
        status[1].status = TaskStatus::Done;
        assert!(has_tasks_changed(&base, &status));

        let mut priority = base.clone();
        priority[0].priority = TaskPriority::Urgent;
        assert!(has_tasks_changed(&base, &priority));

        let mut markdown = base.clone();
        markdown[0].markdown.push_str(" edited");
        assert!(has_tasks_changed(&base, &markdown));

        let mut updated = base.clone();
        updated[1].updated = "20240103000000".to_string();
        assert!(has_tasks_changed(&base, &updated));

        assert!(!has_tasks_changed(&base, &base.clone()));
    }

    #[test]
    fn test_untracked_field_change_is_ignored() {
        let base = vec![task("a")];
        let mut fresh = base.clone();
        fresh[0].doc_path = "Elsewhere".to_string();
        assert!(!has_tasks_changed(&base, &fresh));
    }

    #[test]
    fn test_sort_by_priority() {
        let mut a = task("a");
        a.priority = TaskPriority::Normal;
        let mut b = task("b");
        b.priority = TaskPriority::Urgent;
        let mut c = task("c");
        c.priority = TaskPriority::High;

        let sorted = sort_tasks(&[a, b, c], SortKey::Priority);
        let order: Vec<_> = sorted.iter().map(|t| t.priority).collect();
        assert_eq!(
            order,
            vec![TaskPriority::Urgent, TaskPriority::High, TaskPriority::Normal]
        );
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut first = task("first");
        first.priority = TaskPriority::High;
        let mut second = task("second");
        second.priority = TaskPriority::High;

        let sorted = sort_tasks(&[first, second], SortKey::Priority);
        assert_eq!(sorted[0].id, "first");
        assert_eq!(sorted[1].id, "second");
    }

    #[test]
    fn test_sort_by_timestamps() {
        let mut old = task("old");
        old.created = "20230101000000".to_string();
        old.updated = "20230101000000".to_string();
        let mut new = task("new");
        new.created = "20240101000000".to_string();
        new.updated = "20240601000000".to_string();

        // Created sorts ascending, updated descending.
        let by_created = sort_tasks(&[new.clone(), old.clone()], SortKey::Created);
        assert_eq!(by_created[0].id, "old");

        let by_updated = sort_tasks(&[old, new], SortKey::Updated);
        assert_eq!(by_updated[0].id, "new");
    }

    #[test]
    fn test_sort_by_content_ignores_case_and_markers() {
        let mut b = task("b");
        b.markdown = "- [ ] Banana".to_string();
        let mut a = task("a");
        a.markdown = "- [ ] ❗ apple".to_string();

        let sorted = sort_tasks(&[b, a], SortKey::Content);
        assert_eq!(sorted[0].id, "a");
    }

    #[test]
    fn test_only_tasks_mode_passes_through() {
        let tasks = vec![task("a"), task("b")];
        match group_tasks(tasks.clone(), DisplayMode::OnlyTasks) {
            TaskView::Flat(flat) => assert_eq!(flat, tasks),
            TaskView::Grouped(_) => panic!("expected flat view"),
        }
    }

    #[test]
    fn test_notebook_grouping_uses_all_bucket() {
        let mut a = task("a");
        a.root_id = "doc1".to_string();
        let mut b = task("b");
        b.root_id = "doc2".to_string();

        let view = group_tasks(vec![a, b], DisplayMode::NotebookTasks);
        let TaskView::Grouped(groups) = view else {
            panic!("expected grouped view");
        };
        assert_eq!(groups.len(), 1);
        let nb = &groups["nb1"];
        assert_eq!(nb.notebook, "Notebook One");
        assert_eq!(nb.documents.len(), 1);
        assert_eq!(nb.documents[ALL_DOCS_KEY].tasks.len(), 2);
        assert_eq!(nb.documents[ALL_DOCS_KEY].doc_path, "");
    }

    #[test]
    fn test_notebook_document_grouping() {
        let mut a = task("a");
        a.root_id = "doc1".to_string();
        let mut b = task("b");
        b.root_id = "doc2".to_string();
        b.doc_path = String::new();

        let view = group_tasks(vec![a, b], DisplayMode::NotebookDocumentTasks);
        let TaskView::Grouped(groups) = view else {
            panic!("expected grouped view");
        };
        let nb = &groups["nb1"];
        assert_eq!(nb.documents.len(), 2);
        assert_eq!(nb.documents["doc1"].doc_path, "Inbox");
        assert_eq!(nb.documents["doc2"].doc_path, "Unknown Document");
    }
}
