//! Server configuration.
//!
//! Loaded from a TOML file, then overridden by environment variables:
//! 1. explicit `--config` path (must exist and parse)
//! 2. `SPOTIFY_MCP_CONFIG` env var
//! 3. `{config_dir}/spotify-mcp/config.toml`
//! 4. defaults
//!
//! `SPOTIFY_ACCESS_TOKEN`, `SPOTIFY_API_BASE_URL` and `SPOTIFY_MARKET`
//! override the corresponding file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::client::web::DEFAULT_API_BASE_URL;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// OAuth access token with the playback, library and playlist scopes.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Web API root (default: `https://api.spotify.com/v1`)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// ISO 3166-1 alpha-2 market applied to catalog lookups
    #[serde(default)]
    pub market: Option<String>,
    /// Upper bound for a single upstream request (default: 30s)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Append logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: default_api_base_url(),
            market: None,
            request_timeout_secs: default_request_timeout_secs(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid configuration")
    }

    /// Load configuration following the documented priority order.
    ///
    /// Runs before logging is configured, so the returned [`ConfigSource`]
    /// carries anything worth reporting.
    pub fn load(explicit_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let (mut config, source) = match explicit_path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let config = Self::from_toml(&contents)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                (config, ConfigSource::File(path.to_path_buf()))
            }
            None => match default_config_path() {
                Some(path) => load_optional(&path),
                None => (Config::default(), ConfigSource::Defaults),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok((config, source))
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("SPOTIFY_ACCESS_TOKEN").filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(url) = lookup("SPOTIFY_API_BASE_URL").filter(|u| !u.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(market) = lookup("SPOTIFY_MARKET").filter(|m| !m.is_empty()) {
            self.market = Some(market);
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    std::env::var("SPOTIFY_MCP_CONFIG")
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("spotify-mcp").join("config.toml")))
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No config file present.
    Defaults,
    /// An implicit config file existed but could not be used.
    Fallback { path: PathBuf, reason: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => tracing::info!("Loaded config from {}", path.display()),
            ConfigSource::Defaults => tracing::info!("No config file found, using defaults"),
            ConfigSource::Fallback { path, reason } => {
                tracing::warn!("Failed to load {}: {}. Using defaults.", path.display(), reason)
            }
        }
    }
}

/// Read an implicit config file; a missing or broken file falls back to defaults.
fn load_optional(path: &Path) -> (Config, ConfigSource) {
    if !path.exists() {
        return (Config::default(), ConfigSource::Defaults);
    }
    let fallback = |reason: String| {
        (
            Config::default(),
            ConfigSource::Fallback {
                path: path.to_path_buf(),
                reason,
            },
        )
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => match Config::from_toml(&contents) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(e) => fallback(format!("{:#}", e)),
        },
        Err(e) => fallback(e.to_string()),
    }
}
