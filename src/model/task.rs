use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Checkbox completion state of a list item, plus the unfiltered `All`
/// used as a fetch filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    All,
    Todo,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::All => "all",
            TaskStatus::Todo => "todo",
            TaskStatus::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "all" => Some(TaskStatus::All),
            "todo" => Some(TaskStatus::Todo),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Priority derived from emoji markers in the item's first content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Urgent,
    High,
    Normal,
    Wait,
}

impl TaskPriority {
    /// Fixed sort rank; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::Urgent => 0,
            TaskPriority::High => 1,
            TaskPriority::Normal => 2,
            TaskPriority::Wait => 3,
        }
    }

    /// The marker this priority is detected from, if any.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            TaskPriority::Urgent => Some("‼️"),
            TaskPriority::High => Some("❗"),
            TaskPriority::Wait => Some("⏳"),
            TaskPriority::Normal => None,
        }
    }
}

/// Scope of a task fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskRange {
    Doc,
    Notebook,
    #[default]
    Workspace,
}

impl TaskRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskRange::Doc => "doc",
            TaskRange::Notebook => "notebook",
            TaskRange::Workspace => "workspace",
        }
    }

    pub fn parse(s: &str) -> Option<TaskRange> {
        match s {
            "doc" => Some(TaskRange::Doc),
            "notebook" => Some(TaskRange::Notebook),
            "workspace" => Some(TaskRange::Workspace),
            _ => None,
        }
    }
}

/// How the panel lays tasks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Flat list, no grouping.
    OnlyTasks,
    /// Grouped by notebook.
    NotebookTasks,
    /// Grouped by notebook, then by owning document.
    NotebookDocumentTasks,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::OnlyTasks => "only-tasks",
            DisplayMode::NotebookTasks => "notebook-tasks",
            DisplayMode::NotebookDocumentTasks => "notebook-document-tasks",
        }
    }

    pub fn parse(s: &str) -> Option<DisplayMode> {
        match s {
            "only-tasks" => Some(DisplayMode::OnlyTasks),
            "notebook-tasks" => Some(DisplayMode::NotebookTasks),
            "notebook-document-tasks" => Some(DisplayMode::NotebookDocumentTasks),
            _ => None,
        }
    }
}

/// One checklist line item, assembled from a `blocks` row plus resolved
/// names and the externally persisted today flag. Replaced wholesale on
/// every refresh, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,
    /// Raw markdown of the list item line.
    pub markdown: String,
    pub content: String,
    /// First-line content, the field priority markers are read from.
    pub fcontent: String,
    /// Notebook id.
    pub box_id: String,
    pub box_name: String,
    /// Notebook icon as an emoji character.
    pub box_icon: String,
    /// Owning document id.
    pub root_id: String,
    pub doc_path: String,
    pub created: String,
    pub updated: String,
    pub block_type: String,
    pub subtype: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub is_today: bool,
}

/// Tasks under one document heading in the grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentGroup {
    pub doc_path: String,
    pub tasks: Vec<TaskItem>,
}

/// Tasks of one notebook, keyed by document id (or [`ALL_DOCS_KEY`] when
/// not grouping by document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookGroup {
    pub notebook: String,
    pub icon: String,
    pub documents: IndexMap<String, DocumentGroup>,
}

/// Sentinel document key used when grouping by notebook only.
pub const ALL_DOCS_KEY: &str = "all";

pub type GroupedTasks = IndexMap<String, NotebookGroup>;

/// Output of grouping: either the flat input order or the nested map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskView {
    Flat(Vec<TaskItem>),
    Grouped(GroupedTasks),
}

impl TaskView {
    /// Total number of tasks across all groups.
    pub fn len(&self) -> usize {
        match self {
            TaskView::Flat(tasks) => tasks.len(),
            TaskView::Grouped(groups) => groups
                .values()
                .flat_map(|nb| nb.documents.values())
                .map(|doc| doc.tasks.len())
                .sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Active document context, used for doc-scoped queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocContext {
    pub id: String,
    pub root_id: String,
    pub name: String,
}

/// Active notebook context, used for notebook-scoped queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxContext {
    pub box_id: String,
    pub name: String,
}
