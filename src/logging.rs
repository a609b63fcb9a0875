//! Tracing subscriber setup
//!
//! The TUI owns the terminal, so log output goes to a file. `RUST_LOG`
//! overrides the configured level.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber writing to `log_file_path`
pub fn init_global(log_file_path: &Path, default_level: &str) -> io::Result<()> {
    if let Some(parent) = log_file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let log_file = File::create(log_file_path)?;
    build_subscriber(log_file, default_level)
        .try_init()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
}

/// Subscriber shared by the binary and tests
pub fn build_subscriber(
    log_file: File,
    default_level: &str,
) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
