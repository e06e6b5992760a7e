//! obs-renderer - renders RBAC query proxy manifests
//!
//! Loads the generic manifest templates and the owning Observability custom
//! resource, renders the batch, and writes the resulting manifests to
//! stdout as a multi-document YAML stream.

use anyhow::{Context, Result};
use clap::Parser;

use obs_renderer::cli::{Args, init_logging};
use obs_renderer::rendering::templates;
use obs_renderer::{Renderer, config};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let cr = config::load_cr(&args.cr)?;
    let docs = templates::load_dir(&args.templates)?;
    tracing::debug!("rendering {} templates for CR {}", docs.len(), cr.name);

    let renderer = Renderer::new(cr);
    let rendered = renderer
        .render(&docs)
        .context("Failed to render templates")?;

    for doc in &rendered {
        println!("---");
        print!("{}", serde_yaml::to_string(doc)?);
    }

    Ok(())
}
