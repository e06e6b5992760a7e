//! Template loading from a manifest directory
//!
//! Reads every YAML file in a directory in sorted filename order, splits
//! multi-document streams, and parses each document into the generic form
//! the renderer consumes.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Load all template documents from a directory.
///
/// Files are visited in sorted filename order so the batch order is
/// deterministic. Empty YAML documents are skipped.
pub fn load_dir(dir: &Path) -> Result<Vec<Value>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read template directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect();
    paths.sort();

    let mut docs = Vec::new();
    for path in &paths {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {}", path.display()))?;
        for deserializer in serde_yaml::Deserializer::from_str(&contents) {
            let doc = Value::deserialize(deserializer)
                .with_context(|| format!("Failed to parse template file: {}", path.display()))?;
            if doc.is_null() {
                continue;
            }
            docs.push(doc);
        }
    }

    tracing::debug!(
        "loaded {} template documents from {} files",
        docs.len(),
        paths.len()
    );
    Ok(docs)
}
