use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else asks for more output.
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: RUST_LOG first, then `--verbose`, then the
/// config file, then [`DEFAULT_FILTER`].
pub fn filter_directive(env: Option<String>, verbose: bool, configured: Option<&str>) -> String {
    match env {
        Some(value) if !value.trim().is_empty() => value,
        _ if verbose => "debug".to_string(),
        _ => configured.unwrap_or(DEFAULT_FILTER).to_string(),
    }
}

/// Install the global stderr subscriber.
pub fn init(verbose: bool, configured: Option<&str>) -> Result<()> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), verbose, configured);
    let env_filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow!("invalid log level/filter '{}': {}", directive, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("telemetry error: {}", e))
}
