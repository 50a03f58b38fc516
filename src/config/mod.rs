//! Configuration module for Fyre
//!
//! Holds the settings that shape how the `fyre` binary behaves:
//! - The default log filter (overridden by `RUST_LOG`)
//! - How check reports are rendered
//! - Recently checked documents
//!
//! # Location
//!
//! The config file lives in the platform config directory under `fyre/`:
//! - **Linux**: `~/.config/fyre/fyre.toml`
//! - **macOS**: `~/Library/Application Support/fyre/fyre.toml`
//! - **Windows**: `%APPDATA%\fyre\fyre.toml`
//!
//! # Example
//!
//! ```ignore
//! use fyre_pipeline::config::{self, AppConfig};
//!
//! let path = config::config_path().expect("config directory");
//! let mut config = AppConfig::load(&path)?;
//! config.add_recent_document("flame.json");
//! config.save_default()?;
//! ```

use crate::error::{FyreError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
pub const APP_DIR: &str = "fyre";

/// Config filename
pub const CONFIG_FILE: &str = "fyre.toml";

/// Maximum number of recent documents to remember
pub const MAX_RECENT_DOCUMENTS: usize = 10;

/// Log filter used when neither `RUST_LOG` nor the config file set one
pub const DEFAULT_LOG_FILTER: &str = "info,fyre_pipeline=debug";

/// Get the Fyre config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_DIR))
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// How `fyre check` prints its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One line per violation, human readable
    #[default]
    Text,
    /// A single JSON object
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = FyreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(FyreError::Config(format!("Unknown report format '{}'", other))),
        }
    }
}

/// Report rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// List elements the checker never reached
    #[serde(default = "default_true")]
    pub show_unresolved: bool,

    /// Print the resolved type of every connection
    #[serde(default)]
    pub show_types: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            show_unresolved: true,
            show_types: false,
        }
    }
}

/// Persistent application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub report: ReportConfig,

    /// Most recent first
    #[serde(default)]
    pub recent_documents: Vec<PathBuf>,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            report: ReportConfig::default(),
            recent_documents: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).with_context(|| format!("Failed to write config {:?}", path))
    }

    /// Save config to the default location
    pub fn save_default(&self) -> Result<()> {
        let path = config_path().ok_or_else(|| {
            FyreError::Config("Could not determine config directory".to_string())
        })?;
        self.save(path)
    }

    /// Move `path` to the front of the recent list
    pub fn add_recent_document(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();

        self.recent_documents.retain(|p| *p != path);
        self.recent_documents.insert(0, path);
        self.recent_documents.truncate(MAX_RECENT_DOCUMENTS);
    }

    /// Drop recent entries whose files no longer exist
    pub fn cleanup_missing_documents(&mut self) {
        self.recent_documents.retain(|p| p.exists());
    }
}
