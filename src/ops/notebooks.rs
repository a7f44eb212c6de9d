//! Notebook and document metadata resolution with an owned cache.

use std::collections::HashMap;

use tracing::warn;

use crate::host::{HostApi, Notebook};

pub const UNKNOWN_NOTEBOOK: &str = "Unknown Notebook";
pub const UNKNOWN_DOCUMENT: &str = "Unknown Document";
pub const DEFAULT_NOTEBOOK_ICON: &str = "🗃";

/// Resolves notebook names/icons and document paths, caching both until
/// explicitly invalidated. Lookups never fail outward; host errors are
/// logged and mapped to the fallback strings.
pub struct NotebookResolver {
    notebooks: Vec<Notebook>,
    notebooks_loaded: bool,
    doc_paths: HashMap<String, String>,
}

impl NotebookResolver {
    pub fn new() -> Self {
        NotebookResolver {
            notebooks: Vec::new(),
            notebooks_loaded: false,
            doc_paths: HashMap::new(),
        }
    }

    /// Drop both caches; the next lookup reloads from the host.
    pub fn invalidate(&mut self) {
        self.notebooks.clear();
        self.notebooks_loaded = false;
        self.doc_paths.clear();
    }

    /// The cached notebook list, loading it on first use.
    pub async fn notebooks(&mut self, host: &dyn HostApi) -> &[Notebook] {
        if !self.notebooks_loaded {
            match host.ls_notebooks().await {
                Ok(notebooks) => {
                    self.notebooks = notebooks;
                    self.notebooks_loaded = true;
                }
                Err(err) => {
                    warn!(%err, "failed to list notebooks");
                    self.notebooks.clear();
                }
            }
        }
        &self.notebooks
    }

    pub async fn notebook_name(&mut self, host: &dyn HostApi, box_id: &str) -> String {
        self.notebooks(host)
            .await
            .iter()
            .find(|nb| nb.id == box_id)
            .map(|nb| nb.name.clone())
            .unwrap_or_else(|| UNKNOWN_NOTEBOOK.to_string())
    }

    /// Notebook icon as an emoji, converting the kernel's codepoint form.
    pub async fn notebook_icon(&mut self, host: &dyn HostApi, box_id: &str) -> String {
        let icon = self
            .notebooks(host)
            .await
            .iter()
            .find(|nb| nb.id == box_id)
            .map(|nb| nb.icon.clone())
            .unwrap_or_default();
        if icon.is_empty() {
            return DEFAULT_NOTEBOOK_ICON.to_string();
        }
        emoji_from_codepoint(&icon)
    }

    /// Human-readable document path, cached per doc id, without the
    /// leading slash the kernel returns.
    pub async fn document_path(&mut self, host: &dyn HostApi, doc_id: &str) -> String {
        if doc_id.is_empty() {
            return UNKNOWN_DOCUMENT.to_string();
        }
        if let Some(path) = self.doc_paths.get(doc_id) {
            return path.clone();
        }
        let path = match host.doc_hpath(doc_id).await {
            Ok(p) if !p.is_empty() => p.strip_prefix('/').unwrap_or(&p).to_string(),
            Ok(_) => UNKNOWN_DOCUMENT.to_string(),
            Err(err) => {
                warn!(%err, doc_id, "failed to resolve document path");
                UNKNOWN_DOCUMENT.to_string()
            }
        };
        self.doc_paths.insert(doc_id.to_string(), path.clone());
        path
    }
}

impl Default for NotebookResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a kernel icon codepoint string to an emoji character.
/// Accepts `"1f4d3"`, `"U+1f4d3"`, a backslash-u form, or a literal emoji.
pub fn emoji_from_codepoint(icon: &str) -> String {
    let hex = if icon.starts_with("1f") {
        icon
    } else if let Some(rest) = icon.strip_prefix("U+") {
        rest
    } else if let Some(rest) = icon.strip_prefix("\\u") {
        rest
    } else {
        return icon.to_string();
    };

    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_NOTEBOOK_ICON.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_emoji_from_codepoint_forms() {
        assert_eq!(emoji_from_codepoint("1f4d3"), "📓");
        assert_eq!(emoji_from_codepoint("1f970"), "🥰");
        assert_eq!(emoji_from_codepoint("U+1f4d3"), "📓");
        assert_eq!(emoji_from_codepoint("\\u1f4d3"), "📓");
        // Already an emoji, or an unknown form: passed through.
        assert_eq!(emoji_from_codepoint("📓"), "📓");
        assert_eq!(emoji_from_codepoint("custom.png"), "custom.png");
    }

    #[test]
    fn test_bad_codepoint_falls_back() {
        assert_eq!(emoji_from_codepoint("1fzzzz"), DEFAULT_NOTEBOOK_ICON);
    }
}
