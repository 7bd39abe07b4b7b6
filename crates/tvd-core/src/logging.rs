//! Logging init: append to `tvd.log` under the XDG state dir, or stderr.
//!
//! The side channel only ever logs at debug level, so `RUST_LOG` (or the
//! default `tvd_core=debug`) decides whether swallowed failures are visible.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tvd_core=debug";
const LOG_FILE: &str = "tvd.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/tvd/tvd.log`. The directory is not created.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("tvd").context("resolve XDG directories")?;
    Ok(dirs.get_state_home().join(LOG_FILE))
}

/// Install a file subscriber. Errors (unwritable state dir, a subscriber
/// already installed) are returned so the caller can fall back to
/// `init_logging_stderr`.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "tvd logging initialized");
    Ok(())
}

/// Stderr-only subscriber; a no-op if one is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_prefixed_state_dir() {
        let Ok(path) = log_file_path() else {
            // No HOME in this environment.
            return;
        };
        assert!(path.ends_with("tvd/tvd.log"), "{}", path.display());
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
