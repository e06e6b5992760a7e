//! Shared default transforms and document helpers
//!
//! These transforms work directly on the generic document tree: they only
//! touch well-known metadata fields, so a full typed conversion would buy
//! nothing.

use serde_json::{Map, Value};

use super::{RenderError, RenderResult, Rendered, Renderer};
use crate::config;

/// Kind tag of a document, or "" when absent
pub fn kind_of(doc: &Value) -> &str {
    doc.get("kind").and_then(Value::as_str).unwrap_or("")
}

/// metadata.name of a document, or "" when absent
pub fn name_of(doc: &Value) -> &str {
    doc.pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Builds the MissingField error for a document
pub(crate) fn missing(doc: &Value, field: &'static str) -> RenderError {
    RenderError::MissingField {
        kind: kind_of(doc).to_string(),
        name: name_of(doc).to_string(),
        field,
    }
}

/// Default transform for namespace-scoped kinds: inject the ownership
/// label, pass everything else through
pub(crate) fn render_namespaced(r: &Renderer, mut doc: Value) -> RenderResult {
    label_with_cr(r, &mut doc)?;
    Ok(Rendered::Object(doc))
}

/// Default transform for cluster-scoped RBAC kinds
pub(crate) fn render_cluster_role(r: &Renderer, mut doc: Value) -> RenderResult {
    label_with_cr(r, &mut doc)?;
    Ok(Rendered::Object(doc))
}

/// ClusterRoleBinding transform: ownership label plus pinning every
/// subject's namespace to the operator namespace
pub(crate) fn render_cluster_role_binding(r: &Renderer, mut doc: Value) -> RenderResult {
    label_with_cr(r, &mut doc)?;
    if let Some(subjects) = doc.get_mut("subjects").and_then(Value::as_array_mut) {
        for subject in subjects.iter_mut() {
            if let Some(subject) = subject.as_object_mut() {
                subject.insert(
                    "namespace".to_string(),
                    Value::String(config::DEFAULT_NAMESPACE.to_string()),
                );
            }
        }
    }
    Ok(Rendered::Object(doc))
}

/// Stamp the ownership label with the CR's name as its value
pub(crate) fn label_with_cr(r: &Renderer, doc: &mut Value) -> Result<(), RenderError> {
    let err = missing(doc, "metadata");
    let Some(root) = doc.as_object_mut() else {
        return Err(err);
    };
    let metadata = root
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(metadata) = metadata.as_object_mut() else {
        return Err(err);
    };
    let labels = metadata
        .entry("labels")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(labels) = labels.as_object_mut() else {
        return Err(err);
    };
    labels.insert(
        config::CR_LABEL_KEY.to_string(),
        Value::String(r.cr().name.clone()),
    );
    Ok(())
}
