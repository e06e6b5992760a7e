//! The generic/typed conversion boundary
//!
//! All movement between the untyped document tree and the strongly shaped
//! k8s-openapi types goes through these two functions so shape mismatches
//! surface as a single, auditable error kind.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::RenderError;
use super::common;

/// Convert a generic manifest document into its typed form.
///
/// Fails with a Conversion error when the document's shape does not match
/// the expected kind (including a missing or mismatched apiVersion/kind).
pub fn to_typed<T: DeserializeOwned>(doc: &Value) -> Result<T, RenderError> {
    serde_json::from_value(doc.clone()).map_err(|source| RenderError::Conversion {
        kind: common::kind_of(doc).to_string(),
        name: common::name_of(doc).to_string(),
        source,
    })
}

/// Convert a typed object back into a generic manifest document
pub fn to_generic<T>(obj: &T) -> Result<Value, RenderError>
where
    T: Serialize + k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta>,
{
    serde_json::to_value(obj).map_err(|source| RenderError::Conversion {
        kind: T::KIND.to_string(),
        name: obj.metadata().name.clone().unwrap_or_default(),
        source,
    })
}
