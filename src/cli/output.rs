use crate::model::{TaskItem, TaskPriority, TaskStatus, TaskView};

fn checkbox(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Done => "[x]",
        _ => "[ ]",
    }
}

fn priority_tag(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Urgent => "!! ",
        TaskPriority::High => "!  ",
        TaskPriority::Wait => "~  ",
        TaskPriority::Normal => "   ",
    }
}

fn task_line(task: &TaskItem, indent: usize) -> String {
    let today = if task.is_today { "@today " } else { "" };
    format!(
        "{:indent$}{} {}{}{}",
        "",
        checkbox(task.status),
        priority_tag(task.priority),
        today,
        crate::classify::extract_task_text(&task.fcontent),
    )
}

/// Plain-text rendering of a task view, grouped or flat.
pub fn render_tasks(view: &TaskView) -> String {
    let mut out = String::new();
    match view {
        TaskView::Flat(tasks) => {
            for task in tasks {
                out.push_str(&task_line(task, 0));
                out.push('\n');
            }
        }
        TaskView::Grouped(groups) => {
            for group in groups.values() {
                out.push_str(&format!("{} {}\n", group.icon, group.notebook));
                for doc in group.documents.values() {
                    let indent = if doc.doc_path.is_empty() {
                        2
                    } else {
                        out.push_str(&format!("  {}\n", doc.doc_path));
                        4
                    };
                    for task in &doc.tasks {
                        out.push_str(&task_line(task, indent));
                        out.push('\n');
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::TaskItem;

    fn task() -> TaskItem {
        TaskItem {
            id: "t1".to_string(),
            markdown: "- [ ] ❗ ship it".to_string(),
            content: "ship it".to_string(),
            fcontent: "❗ ship it".to_string(),
            box_id: "nb1".to_string(),
            box_name: "Work".to_string(),
            box_icon: "🗃".to_string(),
            root_id: "doc1".to_string(),
            doc_path: "Projects/Launch".to_string(),
            created: String::new(),
            updated: String::new(),
            block_type: "i".to_string(),
            subtype: "t".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            is_today: true,
        }
    }

    #[test]
    fn test_flat_rendering() {
        let out = render_tasks(&TaskView::Flat(vec![task()]));
        assert_eq!(out, "[ ] !  @today ship it\n");
    }
}
