//! The host surface: everything the panel needs from the SiYuan kernel,
//! behind one trait so tests can swap in a fake.

pub mod client;
pub mod types;

pub use client::KernelClient;
pub use types::{DirEntry, Notebook, RawBlock};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("kernel error {code}: {msg}")]
    Kernel { code: i64, msg: String },
    #[error("malformed kernel response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("file not found: {0}")]
    FileNotFound(String),
}

/// Read-only-plus-plugin-storage view of the kernel. All calls are
/// request/response round trips awaited sequentially.
#[async_trait]
pub trait HostApi: Send + Sync {
    /// Run a read-only SQL statement against the `blocks` table.
    async fn sql_query(&self, stmt: &str) -> Result<Vec<RawBlock>, HostError>;

    /// List all notebooks, including closed ones.
    async fn ls_notebooks(&self) -> Result<Vec<Notebook>, HostError>;

    /// Resolve a document id to its human-readable path.
    async fn doc_hpath(&self, doc_id: &str) -> Result<String, HostError>;

    /// Read a file under the workspace data directory.
    async fn get_file(&self, path: &str) -> Result<Vec<u8>, HostError>;

    /// Write a file under the workspace data directory.
    async fn put_file(&self, path: &str, data: Vec<u8>) -> Result<(), HostError>;

    /// Remove a file under the workspace data directory.
    async fn remove_file(&self, path: &str) -> Result<(), HostError>;

    /// List a directory under the workspace data directory.
    async fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, HostError>;
}
