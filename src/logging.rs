use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default directive when RUST_LOG is unset
const DEFAULT_FILTER: &str = "info";

/// Send tracing output to `log_path`. The terminal belongs to the UI,
/// so nothing is written to stdout or stderr.
pub fn install_tracing(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .compact()
        .try_init();
    if let Err(err) = installed {
        // The subscriber already in place keeps receiving events
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }

    Ok(())
}
