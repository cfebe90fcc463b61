//! Configuration loading for the estate client.
//!
//! Precedence, highest first: explicit overrides (command line), environment
//! variables, `~/.config/estate/config.toml`, built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use estate_core::EstateError;
use estate_core::config::ClientConfig;
use estate_core::error::Result;
use tracing::{debug, warn};

use crate::paths::EstatePaths;

pub const ENV_API_BASE_URL: &str = "ESTATE_API_BASE_URL";
pub const ENV_DOWNLOAD_DIR: &str = "ESTATE_DOWNLOAD_DIR";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "ESTATE_REQUEST_TIMEOUT_SECS";

/// Values given explicitly by the caller; each one wins over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(dir) = &self.download_dir {
            config.download_dir = Some(dir.clone());
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = Some(secs);
        }
        config
    }
}

/// Loads the effective configuration from all sources.
pub fn load_client_config(overrides: &ConfigOverrides) -> Result<ClientConfig> {
    let from_file = match EstatePaths::config_file() {
        Ok(path) => read_config_file(&path)?,
        Err(err) => {
            warn!("Skipping config file: {}", err);
            ClientConfig::default()
        }
    };

    let from_env = apply_env(from_file, |key| env::var(key).ok())?;
    Ok(overrides.apply(from_env))
}

/// Reads a TOML config file. A missing file yields the defaults.
pub fn read_config_file(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        EstateError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        EstateError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Applies environment values obtained through `lookup`. Empty values are ignored.
pub fn apply_env<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = read(ENV_API_BASE_URL) {
        config.api_base_url = url;
    }
    if let Some(dir) = read(ENV_DOWNLOAD_DIR) {
        config.download_dir = Some(PathBuf::from(dir));
    }
    if let Some(secs) = read(ENV_REQUEST_TIMEOUT_SECS) {
        let secs = secs.trim().parse::<u64>().map_err(|_| {
            EstateError::config(format!(
                "{ENV_REQUEST_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'"
            ))
        })?;
        config.request_timeout_secs = Some(secs);
    }

    Ok(config)
}
