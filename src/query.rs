//! Task query construction against the kernel's `blocks` table.
//!
//! The stored subtype filter (`subtype = 't'`) over-selects, so results
//! are run through the checkbox classifier a second time after the query.

use tracing::debug;

use crate::classify;
use crate::host::{HostApi, HostError, RawBlock};
use crate::model::{BoxContext, DocContext, TaskRange, TaskStatus};

/// Block type of a single list element in the kernel schema.
const BLOCK_TYPE_LIST_ITEM: &str = "i";
/// Subtype marking a checklist ("task") list element.
const SUBTYPE_TASK: &str = "t";

/// Build the SQL for a task fetch. String-built on purpose: the kernel's
/// query endpoint takes a full statement, and every interpolated value is
/// an internally generated block id or a bounded integer.
pub fn build_task_query(
    range: TaskRange,
    status: TaskStatus,
    doc: &DocContext,
    notebook: &BoxContext,
    limit: u32,
) -> String {
    let mut stmt = format!(
        "SELECT * FROM blocks WHERE type = '{BLOCK_TYPE_LIST_ITEM}' AND subtype = '{SUBTYPE_TASK}'"
    );

    if status == TaskStatus::Todo {
        stmt.push_str(
            " AND (markdown LIKE '- [ ]%' OR markdown LIKE '* [ ]%' OR markdown LIKE '[ ]%')",
        );
    }

    match range {
        TaskRange::Doc if !doc.root_id.is_empty() => {
            stmt.push_str(&format!(" AND root_id = '{}'", doc.root_id));
        }
        TaskRange::Notebook if !notebook.box_id.is_empty() => {
            stmt.push_str(&format!(" AND box = '{}'", notebook.box_id));
        }
        _ => {}
    }

    // Newest first so the row limit never cuts off recent tasks.
    stmt.push_str(&format!(" ORDER BY created DESC LIMIT {limit}"));
    stmt
}

/// Second-pass status filter over raw rows.
pub fn filter_by_status(blocks: Vec<RawBlock>, status: TaskStatus) -> Vec<RawBlock> {
    blocks
        .into_iter()
        .filter(|b| match status {
            TaskStatus::Todo => classify::is_todo(&b.markdown),
            TaskStatus::Done => classify::is_done(&b.markdown),
            TaskStatus::All => classify::is_todo(&b.markdown) || classify::is_done(&b.markdown),
        })
        .collect()
}

/// Fetch raw task rows for the given scope and status.
pub async fn fetch_tasks(
    host: &dyn HostApi,
    range: TaskRange,
    status: TaskStatus,
    doc: &DocContext,
    notebook: &BoxContext,
    limit: u32,
) -> Result<Vec<RawBlock>, HostError> {
    debug!(range = range.as_str(), status = status.as_str(), limit, "fetching tasks");
    let stmt = build_task_query(range, status, doc, notebook, limit);
    let rows = host.sql_query(&stmt).await?;
    Ok(filter_by_status(rows, status))
}
