//! Logging initialization

/// Initialize logging based on debug flag
///
/// Logs go to stderr so the rendered manifests own stdout. RUST_LOG
/// overrides the default level either way.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(true)
        .init();
}
