//! Tool Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => bail!("Unknown log format {other:?}, expected \"json\" or \"pretty\""),
        }
    }
}

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback tracing filter when `RUST_LOG` is unset (default: `cc_staff=info`)
    pub log_filter: String,

    /// Log output format (default: json)
    pub log_format: LogFormat,

    /// Directory holding the JSON snapshots (default: ./data)
    pub data_dir: PathBuf,

    /// Refuse to start when the rank table fails validation (default: true)
    pub strict_rank_table: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_filter: env::var("CC_LOG_FILTER").unwrap_or_else(|_| "cc_staff=info".into()),
            log_format: match env::var("CC_LOG_FORMAT") {
                Ok(v) => v.parse::<LogFormat>().context("Invalid CC_LOG_FORMAT")?,
                Err(_) => LogFormat::Json,
            },
            data_dir: env::var("CC_DATA_DIR")
                .map_or_else(|_| PathBuf::from("./data"), PathBuf::from),
            strict_rank_table: match env::var("CC_STRICT_RANK_TABLE") {
                Ok(v) => parse_bool(&v).context("Invalid CC_STRICT_RANK_TABLE")?,
                Err(_) => true,
            },
        })
    }

    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    #[must_use]
    pub fn punishments_path(&self) -> PathBuf {
        self.data_dir.join("punishments.json")
    }

    #[must_use]
    pub fn rules_path(&self) -> PathBuf {
        self.data_dir.join("rules.json")
    }

    #[must_use]
    pub fn announcements_path(&self) -> PathBuf {
        self.data_dir.join("announcements.json")
    }

    #[must_use]
    pub fn reports_path(&self) -> PathBuf {
        self.data_dir.join("reports.json")
    }

    #[must_use]
    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join("messages.json")
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            log_filter: "cc_staff=debug".into(),
            log_format: LogFormat::Pretty,
            data_dir: env::temp_dir().join("cc-staff-test"),
            strict_rank_table: true,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Expected a boolean, got {other:?}"),
    }
}
