//! Manifest rendering for the RBAC query proxy
//!
//! The renderer maps each template document's kind to a transform function,
//! applies it to a deep copy of the document, and aggregates the results in
//! input order. Kinds without a registered transform pass through
//! unmodified; a transform may also elide its document from the output
//! entirely. Any transform error aborts the whole batch.

pub mod common;
mod convert;
pub mod proxy;
pub mod templates;

pub use convert::{to_generic, to_typed};

use serde_json::Value;
use std::collections::HashMap;

use crate::config::Observability;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A template does not round-trip between its generic and typed form
    #[error("cannot convert {kind}/{name} between generic and typed form: {source}")]
    Conversion {
        kind: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A template is structurally valid but lacks a field the transform
    /// cannot proceed without
    #[error("template {kind}/{name} is missing required field {field}")]
    MissingField {
        kind: String,
        name: String,
        field: &'static str,
    },

    /// Secret material generation failed
    #[error("failed to generate secret material for {name}: {reason}")]
    Generation { name: String, reason: String },
}

/// Outcome of a single transform invocation.
///
/// `Elided` is distinct from the batch-level passthrough for unknown kinds:
/// it means a registered transform decided the document should not be
/// emitted at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Object(Value),
    Elided,
}

/// Result type for transform functions
pub type RenderResult = Result<Rendered, RenderError>;

type RenderFn = fn(&Renderer, Value) -> RenderResult;

/// Kinds that only need the ownership label injected
const NAMESPACED_KINDS: &[&str] = &[
    "Service",
    "ServiceAccount",
    "ConfigMap",
    "Role",
    "RoleBinding",
    "Ingress",
    "PersistentVolumeClaim",
];

/// Renders proxy manifest templates for one custom resource instance
pub struct Renderer {
    cr: Observability,
    functions: HashMap<&'static str, RenderFn>,
}

impl Renderer {
    /// Build a renderer with the fixed kind dispatch table
    pub fn new(cr: Observability) -> Self {
        let mut functions: HashMap<&'static str, RenderFn> = HashMap::new();
        functions.insert("Deployment", proxy::render_deployment as RenderFn);
        functions.insert("Secret", proxy::render_secret);
        for kind in NAMESPACED_KINDS.iter().copied() {
            functions.insert(kind, common::render_namespaced);
        }
        functions.insert("ClusterRole", common::render_cluster_role);
        functions.insert("ClusterRoleBinding", common::render_cluster_role_binding);
        Self { cr, functions }
    }

    /// The owning custom resource, shared read-only by all transforms
    pub fn cr(&self) -> &Observability {
        &self.cr
    }

    /// Render a batch of templates in input order.
    ///
    /// Fails fast: the first transform error aborts the batch and no
    /// partial output is returned.
    pub fn render(&self, templates: &[Value]) -> Result<Vec<Value>, RenderError> {
        let mut rendered = Vec::with_capacity(templates.len());
        for template in templates {
            let kind = common::kind_of(template);
            let Some(function) = self.functions.get(kind) else {
                tracing::debug!("no transform registered for kind {}, passing through", kind);
                rendered.push(template.clone());
                continue;
            };
            // Deep copy so the transform never aliases the caller's document
            match function(self, template.clone())? {
                Rendered::Object(doc) => rendered.push(doc),
                Rendered::Elided => {
                    tracing::debug!(
                        "transform elided {}/{}",
                        kind,
                        common::name_of(template)
                    );
                }
            }
        }
        Ok(rendered)
    }
}
