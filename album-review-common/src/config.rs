//! Bootstrap configuration loading and API key resolution
//!
//! The TOML file holds bootstrap concerns only (port, catalog endpoint,
//! credential, logging). A missing file is not an error: every field has a
//! built-in default.
//!
//! # API key sources priority
//!
//! 1. Command-line argument (`--lastfm-api-key`)
//! 2. Environment variable (`ALBUM_REVIEW_LASTFM_API_KEY`)
//! 3. TOML configuration file (`lastfm_api_key = "..."`)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable consulted for the Last.fm API key
pub const LASTFM_API_KEY_ENV: &str = "ALBUM_REVIEW_LASTFM_API_KEY";

/// Last.fm web service root
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0";

/// Default HTTP port for the album-review service
pub const DEFAULT_PORT: u16 = 5780;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog service root URL (overridable for staging or test doubles)
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// Last.fm API key (optional; the album chooser is hidden without it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastfm_api_key: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            catalog_base_url: default_catalog_base_url(),
            lastfm_api_key: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Get the per-user configuration file path for the platform
///
/// `~/.config/album-review/config.toml` on Linux, the platform equivalent
/// elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("album-review").join("config.toml"))
}

/// Load TOML bootstrap configuration
///
/// Returns built-in defaults when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        info!("Config file {} not found, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;

    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Write TOML configuration atomically
///
/// Writes to a sibling temp file and renames it over the target so readers
/// never observe a half-written file.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the Last.fm API key from CLI, environment and TOML
///
/// Returns `None` when no source holds a valid key. That is a supported
/// configuration: the album chooser is simply not offered.
pub fn resolve_lastfm_api_key(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(LASTFM_API_KEY_ENV).ok();

    let candidates = [
        ("command line", cli_arg.map(str::to_string)),
        ("environment", env_key),
        ("TOML", toml_config.lastfm_api_key.clone()),
    ];

    let valid: Vec<(&str, String)> = candidates
        .into_iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
        .collect();

    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "Last.fm API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    match valid.into_iter().next() {
        Some((source, key)) => {
            info!("Last.fm API key loaded from {}", source);
            Some(key.trim().to_string())
        }
        None => {
            warn!(
                "Last.fm API key not configured; album chooser disabled. Set {} or lastfm_api_key in the config file",
                LASTFM_API_KEY_ENV
            );
            None
        }
    }
}
