//! Endpoint configuration for the classification service.
//!
//! The base URL is resolved once at startup: the `VOCALSCAN_API_URL`
//! environment variable wins, then `api_base_url` in `~/.vocalscan/config.toml`,
//! then the default local backend address.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding the configured base URL.
pub const API_URL_ENV: &str = "VOCALSCAN_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// App settings persisted in the TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the classification service, without the `/classify` path.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application directory could not be resolved or created.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file exists but is not valid TOML.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load the config file from the `.vocalscan` root, falling back to defaults
/// when the file does not exist yet.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME);
    load_from(&path)
}

/// Resolve the base URL the classifier client should use, applying the
/// environment override and normalizing trailing slashes.
pub fn resolve_api_base_url(config: &AppConfig) -> String {
    let from_env = std::env::var(API_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty());
    normalize_base_url(from_env.as_deref().unwrap_or(&config.api_base_url))
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
