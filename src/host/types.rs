use serde::{Deserialize, Serialize};

/// One row of the kernel's `blocks` table, as returned by `/api/query/sql`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub markdown: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub fcontent: String,
    /// Notebook id; the column is literally named `box`.
    #[serde(default, rename = "box")]
    pub box_id: String,
    #[serde(default)]
    pub root_id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default, rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub subtype: String,
}

/// A notebook as returned by `/api/notebook/lsNotebooks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: String,
    pub name: String,
    /// Emoji codepoint string like `"1f4d3"`, or empty.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub closed: bool,
}

/// An entry from `/api/file/readDir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "isDir")]
    pub is_dir: bool,
}

/// The kernel's uniform response envelope.
#[derive(Debug, Deserialize)]
pub struct KernelEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

/// Payload of `/api/notebook/lsNotebooks`.
#[derive(Debug, Deserialize)]
pub struct NotebooksData {
    pub notebooks: Vec<Notebook>,
}
