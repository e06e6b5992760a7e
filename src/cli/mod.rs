//! CLI argument parsing and logging setup

mod logging;

pub use logging::init_logging;

use clap::Parser;
use std::path::PathBuf;

/// Render proxy manifest templates for an Observability instance
#[derive(Parser, Debug)]
#[command(name = "obs-renderer")]
#[command(about = "Renders RBAC query proxy manifests for the observability operator", long_about = None)]
pub struct Args {
    /// Directory containing the manifest templates
    #[arg(long)]
    pub templates: PathBuf,

    /// YAML file with the owning Observability custom resource
    #[arg(long)]
    pub cr: PathBuf,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,
}
