//! Dedicated transforms for the proxy Deployment and Secret templates
//!
//! The Deployment transform specializes the generic template with runtime
//! configuration from the custom resource: ownership labels, replicas,
//! per-container images and args, scheduling constraints, and certificate
//! volume references. The Secret transform injects generated session
//! material into exactly one named secret.

use k8s_openapi::ByteString;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{LocalObjectReference, Secret};
use serde_json::Value;

use super::common;
use super::convert::{to_generic, to_typed};
use super::{RenderError, RenderResult, Rendered, Renderer};
use crate::config;
use crate::util;

/// Container index of the primary proxy workload
const PROXY_CONTAINER: usize = 0;

/// Container index of the oauth-proxy sidecar
const OAUTH_CONTAINER: usize = 1;

/// Specialize the proxy Deployment template.
///
/// Either returns a fully rendered document or an error; no partially
/// mutated result ever escapes.
pub(crate) fn render_deployment(r: &Renderer, template: Value) -> RenderResult {
    let mut dep: Deployment = to_typed(&template)?;
    let cr = r.cr();

    // The ownership label must land on the object, the selector, and the
    // pod template together, or the selector cannot match its own pods.
    dep.metadata
        .labels
        .get_or_insert_with(Default::default)
        .insert(config::CR_LABEL_KEY.to_string(), cr.name.clone());

    let spec = dep
        .spec
        .as_mut()
        .ok_or_else(|| common::missing(&template, "spec"))?;
    spec.selector
        .match_labels
        .get_or_insert_with(Default::default)
        .insert(config::CR_LABEL_KEY.to_string(), cr.name.clone());
    spec.template
        .metadata
        .get_or_insert_with(Default::default)
        .labels
        .get_or_insert_with(Default::default)
        .insert(config::CR_LABEL_KEY.to_string(), cr.name.clone());

    // None is a valid "use cluster default" replica count
    spec.replicas = config::replicas_for(config::RBAC_QUERY_PROXY, cr.spec.advanced.as_ref());

    let pod = spec
        .template
        .spec
        .as_mut()
        .ok_or_else(|| common::missing(&template, "spec.template.spec"))?;
    if pod.containers.len() <= OAUTH_CONTAINER {
        return Err(common::missing(
            &template,
            "spec.template.spec.containers[1]",
        ));
    }

    let pull_policy = config::image_pull_policy(&cr.spec);
    for container in pod.containers.iter_mut() {
        container.image_pull_policy = Some(pull_policy.clone());
        if let Some(args) = container.args.as_mut() {
            // First occurrence only, independently per argument
            for arg in args.iter_mut() {
                *arg = arg.replacen(config::NAMESPACE_PLACEHOLDER, config::DEFAULT_NAMESPACE, 1);
            }
        }
    }
    pod.containers[PROXY_CONTAINER].resources = Some(config::resources_for(
        config::RBAC_QUERY_PROXY,
        cr.spec.advanced.as_ref(),
    ));

    // Full replace, not merge
    pod.node_selector = cr.spec.node_selector.clone();
    pod.tolerations = cr.spec.tolerations.clone();
    pod.image_pull_secrets = Some(vec![LocalObjectReference {
        name: config::image_pull_secret(&cr.spec),
    }]);

    // Primary image: annotation-driven override, else the template default
    let current = pod.containers[PROXY_CONTAINER]
        .image
        .clone()
        .unwrap_or_default();
    let (found, image) = config::resolve_image(
        cr.annotations.as_ref(),
        &current,
        config::RBAC_QUERY_PROXY_KEY,
    );
    if found {
        pod.containers[PROXY_CONTAINER].image = Some(image);
    }
    if let Some(pinned) = cr.spec.proxy_image_override.as_ref() {
        pod.containers[PROXY_CONTAINER].image = Some(pinned.clone());
    }

    // The oauth-proxy image is governed by the built-in image manifest
    // only; user annotations are deliberately ignored.
    let (found, image) = config::resolve_image(
        None,
        config::OAUTH_PROXY_DEFAULT_IMAGE,
        config::OAUTH_PROXY_KEY,
    );
    if found {
        pod.containers[OAUTH_CONTAINER].image = Some(image);
    }

    if let Some(volumes) = pod.volumes.as_mut() {
        for volume in volumes.iter_mut() {
            let replacement = match volume.name.as_str() {
                config::SERVER_CERTS_VOLUME => Some(config::SERVER_CERTS),
                config::CLIENT_CERTS_VOLUME => Some(config::CLIENT_CERTS),
                _ => None,
            };
            if let (Some(name), Some(secret)) = (replacement, volume.secret.as_mut()) {
                secret.secret_name = Some(name.to_string());
            }
        }
    }

    to_generic(&dep).map(Rendered::Object)
}

/// Render a proxy Secret template.
///
/// Every secret gets the ownership label; only the cookie secret
/// additionally receives generated session material.
pub(crate) fn render_secret(r: &Renderer, template: Value) -> RenderResult {
    let doc = match common::render_namespaced(r, template)? {
        Rendered::Object(doc) => doc,
        other => return Ok(other),
    };
    if common::name_of(&doc) != config::PROXY_COOKIE_SECRET {
        return Ok(Rendered::Object(doc));
    }

    let mut secret: Secret = to_typed(&doc)?;
    let password =
        util::generate_password(config::SESSION_SECRET_LENGTH).map_err(|source| {
            RenderError::Generation {
                name: config::PROXY_COOKIE_SECRET.to_string(),
                reason: source.to_string(),
            }
        })?;
    secret
        .data
        .get_or_insert_with(Default::default)
        .insert(
            config::SESSION_SECRET_KEY.to_string(),
            ByteString(password.into_bytes()),
        );
    to_generic(&secret).map(Rendered::Object)
}
