//! Manifest rendering engine for the observability RBAC query proxy
//!
//! Takes the operator's generic manifest templates and specializes them for
//! one Observability custom resource instance: ownership labels, replica
//! counts, images, scheduling constraints, and generated session secrets.
//! It can be used both as a binary and as a library for testing.

pub mod cli;
pub mod config;
pub mod rendering;
pub mod util;

// Re-export commonly used types for convenience
pub use config::Observability;
pub use rendering::{RenderError, Rendered, Renderer};
