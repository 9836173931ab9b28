use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::filter::FilterSelector;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Terminal dashboard for the AI news backend.
#[derive(Debug, Clone, Parser)]
#[command(name = "newsdash", version, about)]
pub struct Config {
    /// Base URL of the article backend.
    #[arg(long, env = "NEWSDASH_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Directory for the saved list and the log file.
    #[arg(long, env = "NEWSDASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Initial filter: all, rundown, reddit, bens or saved.
    #[arg(long, default_value = "all")]
    pub filter: String,

    /// Request timeout in seconds. No timeout when unset.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Disable the log file.
    #[arg(long)]
    pub no_log: bool,
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("newsdash"))
                .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir")),
        }
    }

    pub fn initial_filter(&self) -> FilterSelector {
        FilterSelector::from_tag(&self.filter)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SourceFilter;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["newsdash"]);
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.initial_filter(), FilterSelector::All);
        assert!(config.timeout().is_none());
        assert!(!config.no_log);
    }

    #[test]
    fn explicit_values() {
        let config = Config::parse_from([
            "newsdash",
            "--backend-url",
            "http://news.local:9000",
            "--data-dir",
            "/tmp/nd",
            "--filter",
            "Reddit",
            "--timeout-secs",
            "15",
        ]);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/nd"));
        assert_eq!(config.initial_filter(), FilterSelector::Source(SourceFilter::Reddit));
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }
}
