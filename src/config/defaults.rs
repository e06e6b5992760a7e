//! Built-in defaults and policy lookups
//!
//! Constants for the managed proxy workload plus the lookup functions that
//! resolve replica counts, resource requirements, images, and pull settings
//! from the custom resource spec.

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

use super::schema::{AdvancedConfig, ObservabilitySpec};

/// Label key stamped on every managed resource, valued with the owning
/// custom resource's name
pub const CR_LABEL_KEY: &str = "observability.open-cluster-management.io/name";

/// Namespace the operator renders into
pub const DEFAULT_NAMESPACE: &str = "open-cluster-management-observability";

/// Placeholder token in template container args denoting the operator's own
/// namespace
pub const NAMESPACE_PLACEHOLDER: &str = "{{MCO_NAMESPACE}}";

/// Component name of the primary proxy workload
pub const RBAC_QUERY_PROXY: &str = "rbac-query-proxy";

/// Image manifest key for the primary proxy container
pub const RBAC_QUERY_PROXY_KEY: &str = "rbac_query_proxy";

/// Image manifest key for the oauth-proxy sidecar container
pub const OAUTH_PROXY_KEY: &str = "oauth_proxy";

/// Fallback image reference for the oauth-proxy sidecar
pub const OAUTH_PROXY_DEFAULT_IMAGE: &str = "quay.io/openshift/origin-oauth-proxy:4.16";

/// Name of the secret carrying the generated oauth session secret
pub const PROXY_COOKIE_SECRET: &str = "rbac-proxy-cookie-secret";

/// Data key the generated session secret is stored under
pub const SESSION_SECRET_KEY: &str = "session_secret";

/// Length of the generated session secret
pub const SESSION_SECRET_LENGTH: usize = 16;

/// Pod volume names whose secret reference is rewritten to the managed
/// certificate secrets
pub const SERVER_CERTS_VOLUME: &str = "ca-certs";
pub const CLIENT_CERTS_VOLUME: &str = "client-certs";

/// Managed certificate secret names
pub const SERVER_CERTS: &str = "observability-server-certs";
pub const CLIENT_CERTS: &str = "observability-grafana-certs";

/// Annotation prefix for per-component image overrides
pub const IMAGE_OVERRIDE_ANNOTATION_PREFIX: &str = "mco-image-override/";

const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";
const DEFAULT_IMAGE_PULL_SECRET: &str = "multiclusterhub-operator-pull-secret";

/// Built-in image manifest: component key to pinned image reference.
///
/// The oauth-proxy sidecar is resolved exclusively from this manifest so
/// that user annotations can never redirect it.
const IMAGE_MANIFEST: &[(&str, &str)] =
    &[(OAUTH_PROXY_KEY, "quay.io/openshift/origin-oauth-proxy:4.16")];

/// Default resource requests per component, applied when the CR carries no
/// advanced override
const RBAC_QUERY_PROXY_CPU_REQUEST: &str = "20m";
const RBAC_QUERY_PROXY_MEMORY_REQUEST: &str = "100Mi";

/// Replica count for a component, from the CR's advanced config.
///
/// `None` is a valid "use the cluster default" signal, not an error.
pub fn replicas_for(component: &str, advanced: Option<&AdvancedConfig>) -> Option<i32> {
    advanced
        .and_then(|a| a.components.get(component))
        .and_then(|c| c.replicas)
}

/// Resource requirements for a component's primary container: the CR's
/// advanced override when present, otherwise the built-in request defaults.
pub fn resources_for(component: &str, advanced: Option<&AdvancedConfig>) -> ResourceRequirements {
    if let Some(resources) = advanced
        .and_then(|a| a.components.get(component))
        .and_then(|c| c.resources.clone())
    {
        return resources;
    }

    let mut requests = BTreeMap::new();
    if component == RBAC_QUERY_PROXY {
        requests.insert(
            "cpu".to_string(),
            Quantity(RBAC_QUERY_PROXY_CPU_REQUEST.to_string()),
        );
        requests.insert(
            "memory".to_string(),
            Quantity(RBAC_QUERY_PROXY_MEMORY_REQUEST.to_string()),
        );
    }
    ResourceRequirements {
        requests: Some(requests),
        ..Default::default()
    }
}

/// Image pull policy for managed containers
pub fn image_pull_policy(spec: &ObservabilitySpec) -> String {
    spec.image_pull_policy
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_PULL_POLICY.to_string())
}

/// Name of the pull secret referenced by managed pods
pub fn image_pull_secret(spec: &ObservabilitySpec) -> String {
    spec.image_pull_secret
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_PULL_SECRET.to_string())
}

/// Resolve an image override for a component.
///
/// Resolution order: an `mco-image-override/<key>` annotation on the CR,
/// then the built-in image manifest. Returns `(true, image)` when an
/// override applies, `(false, default_ref)` otherwise.
pub fn resolve_image(
    annotations: Option<&BTreeMap<String, String>>,
    default_ref: &str,
    key: &str,
) -> (bool, String) {
    if let Some(annotations) = annotations {
        let annotation = format!("{IMAGE_OVERRIDE_ANNOTATION_PREFIX}{key}");
        if let Some(image) = annotations.get(&annotation) {
            tracing::debug!("image for {} overridden by annotation: {}", key, image);
            return (true, image.clone());
        }
    }
    if let Some((_, image)) = IMAGE_MANIFEST.iter().find(|(k, _)| *k == key) {
        return (true, (*image).to_string());
    }
    (false, default_ref.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ComponentConfig;

    #[test]
    fn test_replicas_default_to_none() {
        assert_eq!(replicas_for(RBAC_QUERY_PROXY, None), None);
    }

    #[test]
    fn test_replicas_from_advanced_config() {
        let mut advanced = AdvancedConfig::default();
        advanced.components.insert(
            RBAC_QUERY_PROXY.to_string(),
            ComponentConfig {
                replicas: Some(2),
                resources: None,
            },
        );
        assert_eq!(replicas_for(RBAC_QUERY_PROXY, Some(&advanced)), Some(2));
        assert_eq!(replicas_for("other-component", Some(&advanced)), None);
    }

    #[test]
    fn test_default_resources_carry_requests() {
        let resources = resources_for(RBAC_QUERY_PROXY, None);
        let requests = resources.requests.unwrap();
        assert_eq!(requests.get("cpu").unwrap().0, "20m");
        assert_eq!(requests.get("memory").unwrap().0, "100Mi");
        assert!(resources.limits.is_none());
    }

    #[test]
    fn test_resolve_image_annotation_wins() {
        let mut annotations = BTreeMap::new();
        annotations.insert(
            format!("{IMAGE_OVERRIDE_ANNOTATION_PREFIX}{RBAC_QUERY_PROXY_KEY}"),
            "registry.example.com/proxy:dev".to_string(),
        );
        let (found, image) = resolve_image(
            Some(&annotations),
            "quay.io/stock/proxy:1.0",
            RBAC_QUERY_PROXY_KEY,
        );
        assert!(found);
        assert_eq!(image, "registry.example.com/proxy:dev");
    }

    #[test]
    fn test_resolve_image_falls_back_to_default() {
        let (found, image) =
            resolve_image(None, "quay.io/stock/proxy:1.0", RBAC_QUERY_PROXY_KEY);
        assert!(!found);
        assert_eq!(image, "quay.io/stock/proxy:1.0");
    }

    #[test]
    fn test_oauth_proxy_resolves_from_manifest_without_annotations() {
        let (found, image) = resolve_image(None, OAUTH_PROXY_DEFAULT_IMAGE, OAUTH_PROXY_KEY);
        assert!(found);
        assert_eq!(image, "quay.io/openshift/origin-oauth-proxy:4.16");
    }
}
