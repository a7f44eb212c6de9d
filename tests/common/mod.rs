//! Shared in-memory host for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use taskdock::host::{DirEntry, HostApi, HostError, Notebook, RawBlock};

/// Fake kernel: canned query rows, notebooks, doc paths, and a flat
/// in-memory file store keyed by full path.
#[derive(Default)]
pub struct FakeHost {
    pub blocks: Mutex<Vec<RawBlock>>,
    pub notebooks: Vec<Notebook>,
    pub doc_paths: HashMap<String, String>,
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    pub sql_calls: AtomicUsize,
    pub hpath_calls: AtomicUsize,
    pub fail_sql: AtomicBool,
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost::default()
    }

    pub fn with_notebook(mut self, id: &str, name: &str, icon: &str) -> Self {
        self.notebooks.push(Notebook {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            closed: false,
        });
        self
    }

    pub fn with_doc(mut self, id: &str, hpath: &str) -> Self {
        self.doc_paths.insert(id.to_string(), hpath.to_string());
        self
    }

    pub fn set_blocks(&self, blocks: Vec<RawBlock>) {
        *self.blocks.lock().unwrap() = blocks;
    }

    pub fn write_file(&self, path: &str, data: &[u8]) {
        self.files.lock().unwrap().insert(path.to_string(), data.to_vec());
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

pub fn block(id: &str, markdown: &str, box_id: &str, root_id: &str) -> RawBlock {
    RawBlock {
        id: id.to_string(),
        markdown: markdown.to_string(),
        content: markdown.trim_start_matches("- [ ] ").trim_start_matches("- [x] ").to_string(),
        fcontent: markdown.trim_start_matches("- [ ] ").trim_start_matches("- [x] ").to_string(),
        box_id: box_id.to_string(),
        root_id: root_id.to_string(),
        path: String::new(),
        created: "20240101120000".to_string(),
        updated: "20240101120000".to_string(),
        block_type: "i".to_string(),
        subtype: "t".to_string(),
    }
}

#[async_trait]
impl HostApi for FakeHost {
    async fn sql_query(&self, _stmt: &str) -> Result<Vec<RawBlock>, HostError> {
        self.sql_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sql.load(Ordering::SeqCst) {
            return Err(HostError::Kernel {
                code: -1,
                msg: "database is locked".to_string(),
            });
        }
        Ok(self.blocks.lock().unwrap().clone())
    }

    async fn ls_notebooks(&self) -> Result<Vec<Notebook>, HostError> {
        Ok(self.notebooks.clone())
    }

    async fn doc_hpath(&self, doc_id: &str) -> Result<String, HostError> {
        self.hpath_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.doc_paths.get(doc_id).cloned().unwrap_or_default())
    }

    async fn get_file(&self, path: &str) -> Result<Vec<u8>, HostError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::FileNotFound(path.to_string()))
    }

    async fn put_file(&self, path: &str, data: Vec<u8>) -> Result<(), HostError> {
        self.files.lock().unwrap().insert(path.to_string(), data);
        Ok(())
    }

    async fn remove_file(&self, path: &str) -> Result<(), HostError> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, HostError> {
        let prefix = format!("{path}/");
        let files = self.files.lock().unwrap();
        let entries: Vec<DirEntry> = files
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(|name| DirEntry {
                name: name.to_string(),
                is_dir: false,
            })
            .collect();
        if entries.is_empty() && !files.keys().any(|k| k.starts_with(&prefix)) {
            return Err(HostError::FileNotFound(path.to_string()));
        }
        Ok(entries)
    }
}
