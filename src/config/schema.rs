//! Custom resource schema definitions
//!
//! Defines the shape of the owning Observability custom resource using serde
//! for serialization. Only the fields the renderer reads are modeled here;
//! the rest of the CR is owned by other parts of the operator.

use k8s_openapi::api::core::v1::{ResourceRequirements, Toleration};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The owning Observability custom resource instance
///
/// Shared read-only across all transform invocations of a render batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Observability {
    /// Instance name - becomes the ownership label value on every managed
    /// resource
    pub name: String,

    /// Instance annotations - consulted for image overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Instance spec
    #[serde(default)]
    pub spec: ObservabilitySpec,
}

/// Spec block of the Observability custom resource
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilitySpec {
    /// Image pull policy for all managed containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,

    /// Name of the image pull secret referenced by managed pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secret: Option<String>,

    /// Node selector copied verbatim onto managed pod templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Tolerations copied verbatim onto managed pod templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,

    /// Per-component tuning overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedConfig>,

    /// Unconditional override for the proxy container image, applied after
    /// annotation/manifest resolution. Unset by default; intended for
    /// pinning the image during coordinated multi-repo rollouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_image_override: Option<String>,
}

/// Advanced per-component configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConfig {
    /// Overrides keyed by component name (e.g. "rbac-query-proxy")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentConfig>,
}

/// Tuning knobs for a single component
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    /// Replica count; absent means "use the cluster default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Resource requests/limits for the component's primary container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}
