//! Configuration layer for the renderer
//!
//! Holds the custom resource schema, the built-in defaults and policy
//! lookups, and the CR file loader.

mod defaults;
pub mod loader;
pub mod schema;

pub use defaults::*;
pub use loader::load_cr;
pub use schema::{AdvancedConfig, ComponentConfig, Observability, ObservabilitySpec};
