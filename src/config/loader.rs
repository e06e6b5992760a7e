//! Custom resource loading
//!
//! Parses the owning Observability custom resource from a YAML file.

use anyhow::{Context, Result};
use std::path::Path;

use super::schema::Observability;

/// Load an Observability custom resource from a YAML file
pub fn load_cr(path: &Path) -> Result<Observability> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CR file: {}", path.display()))?;

    let cr: Observability = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse CR file: {}", path.display()))?;

    if cr.name.is_empty() {
        anyhow::bail!("CR file {} has an empty name", path.display());
    }

    Ok(cr)
}
