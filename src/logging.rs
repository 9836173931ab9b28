use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "newsdash.log";

/// Sends tracing output to `<dir>/newsdash.log`. The terminal belongs to the UI.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init(dir: &Path, default_level: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_events_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        init(&dir.path().join("logs"), "debug").unwrap();

        tracing::info!(count = 3, "articles loaded");

        let written = fs::read_to_string(dir.path().join("logs").join(LOG_FILE_NAME)).unwrap();
        assert!(written.contains("articles loaded"));
        assert!(init(dir.path(), "debug").is_err());
    }
}
