//! Checklist line classification: checkbox status, emoji priority
//! markers, and display-text cleanup.
//!
//! SiYuan renders priorities as emoji inside the item text:
//! `‼️` = urgent, `❗` = high, `⏳` = wait. Detection is first-match-wins
//! in that order; no marker means normal priority.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{TaskPriority, TaskStatus};

fn todo_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-\s*\[ \]").unwrap())
}

fn done_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-\s*\[[xX]\]").unwrap())
}

/// SiYuan stores tags as `#Tag#`; the panel shows them as `#Tag`.
fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#([^#\s]+)#").unwrap())
}

/// Whether the markdown line is an unchecked checklist item.
pub fn is_todo(markdown: &str) -> bool {
    todo_re().is_match(markdown)
}

/// Whether the markdown line is a checked checklist item.
pub fn is_done(markdown: &str) -> bool {
    done_re().is_match(markdown)
}

/// Status of a markdown line; `All` when it is not a checklist item.
pub fn detect_status(markdown: &str) -> TaskStatus {
    if is_todo(markdown) {
        TaskStatus::Todo
    } else if is_done(markdown) {
        TaskStatus::Done
    } else {
        TaskStatus::All
    }
}

const MARKED_PRIORITIES: [TaskPriority; 3] =
    [TaskPriority::Urgent, TaskPriority::High, TaskPriority::Wait];

/// Priority from the content text, first match wins: urgent, high, wait,
/// else normal.
pub fn detect_priority(content: &str) -> TaskPriority {
    for priority in MARKED_PRIORITIES {
        if let Some(marker) = priority.marker() {
            if content.contains(marker) {
                return priority;
            }
        }
    }
    TaskPriority::Normal
}

/// Clean task text for display: strip priority markers, convert `#Tag#`
/// to `#Tag`, trim. Idempotent.
pub fn extract_task_text(text: &str) -> String {
    let mut stripped = text.to_string();
    for priority in MARKED_PRIORITIES {
        if let Some(marker) = priority.marker() {
            stripped = stripped.replace(marker, "");
        }
    }
    tag_re().replace_all(&stripped, "#$1").trim().to_string()
}

/// Whether the content carries any priority marker.
pub fn has_priority(content: &str) -> bool {
    detect_priority(content) != TaskPriority::Normal
}

/// Everything the classifiers can say about one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAnalysis {
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub text: String,
    pub has_priority: bool,
}

pub fn analyze_task(markdown: &str) -> TaskAnalysis {
    TaskAnalysis {
        status: detect_status(markdown),
        priority: detect_priority(markdown),
        text: extract_task_text(markdown),
        has_priority: has_priority(markdown),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_todo_detection() {
        assert!(is_todo("- [ ] buy milk"));
        assert!(is_todo("-[ ] tight spacing"));
        assert!(is_todo("-  [ ] extra spacing"));
        assert!(!is_todo("- [x] done"));
        assert!(!is_todo("plain text"));
        assert!(!is_todo("  - [ ] indented is not a top-level item"));
    }

    #[test]
    fn test_done_detection() {
        assert!(is_done("- [x] lowercase"));
        assert!(is_done("- [X] uppercase"));
        assert!(is_done("-[x] tight"));
        assert!(!is_done("- [ ] open"));
        assert!(!is_done("- [y] not a checkbox"));
    }

    #[test]
    fn test_detect_status() {
        assert_eq!(detect_status("- [ ] open"), TaskStatus::Todo);
        assert_eq!(detect_status("- [x] closed"), TaskStatus::Done);
        assert_eq!(detect_status("# heading"), TaskStatus::All);
    }

    #[test]
    fn test_priority_precedence() {
        // Urgent wins over everything else present.
        assert_eq!(detect_priority("‼️ ❗ ⏳ all markers"), TaskPriority::Urgent);
        assert_eq!(detect_priority("❗ ⏳ no urgent"), TaskPriority::High);
        assert_eq!(detect_priority("⏳ wait only"), TaskPriority::Wait);
        assert_eq!(detect_priority("no markers"), TaskPriority::Normal);
    }

    #[test]
    fn test_markers_map_back_to_their_priority() {
        for priority in MARKED_PRIORITIES {
            let marker = priority.marker().unwrap();
            assert_eq!(detect_priority(marker), priority);
            assert_eq!(extract_task_text(&format!("{marker} task")), "task");
        }
        assert_eq!(TaskPriority::Normal.marker(), None);
    }

    #[test]
    fn test_extract_strips_markers() {
        assert_eq!(extract_task_text("❗ High priority task"), "High priority task");
        assert_eq!(extract_task_text("‼️ Urgent task"), "Urgent task");
        assert_eq!(extract_task_text("⏳ Waiting task"), "Waiting task");
        assert_eq!(extract_task_text("No markers here"), "No markers here");
    }

    #[test]
    fn test_extract_converts_hash_tags() {
        assert_eq!(
            extract_task_text("Task with #MyHash# tag"),
            "Task with #MyHash tag"
        );
        assert_eq!(
            extract_task_text("Multiple #Tag1# and #Tag2# tags"),
            "Multiple #Tag1 and #Tag2 tags"
        );
        assert_eq!(extract_task_text("#SingleTag# task"), "#SingleTag task");
        assert_eq!(
            extract_task_text("Task with #numbers123# and #special-chars#"),
            "Task with #numbers123 and #special-chars"
        );
        assert_eq!(
            extract_task_text("❗ High priority task with #MyHash#"),
            "High priority task with #MyHash"
        );
        // Bare hashes are left alone.
        assert_eq!(extract_task_text("#"), "#");
        assert_eq!(extract_task_text("##"), "##");
        assert_eq!(extract_task_text("###"), "###");
        assert_eq!(
            extract_task_text("Task with #tag# and regular #text"),
            "Task with #tag and regular #text"
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        for input in [
            "❗ High priority task",
            "Task with #MyHash# tag",
            "‼️ Urgent with #Tag1# and #Tag2#",
            "plain text",
        ] {
            let once = extract_task_text(input);
            let twice = extract_task_text(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_analyze_markdown_lines() {
        let analysis = analyze_task("- [ ] ❗ High priority task");
        assert_eq!(analysis.status, TaskStatus::Todo);
        assert_eq!(analysis.priority, TaskPriority::High);
        assert!(analysis.has_priority);
        // The cleaned first-line content drops the marker entirely.
        assert_eq!(extract_task_text("❗ High priority task"), "High priority task");

        let analysis = analyze_task("- [x] Completed task");
        assert_eq!(analysis.status, TaskStatus::Done);
        assert_eq!(analysis.priority, TaskPriority::Normal);
        assert_eq!(analysis.text, "- [x] Completed task");
        assert!(!analysis.has_priority);
    }
}
