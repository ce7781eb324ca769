//! JSON config file loading.
//!
//! Responsibilities:
//! - Resolve the config file path (explicit override, `GEOHOSTING_CONFIG_PATH`,
//!   or the platform config directory).
//! - Apply file values to a `ConfigLoader`.
//!
//! Invariants:
//! - A missing file at the default location is not an error.
//! - A missing file at an explicitly requested path is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::builder::ConfigLoader;
use super::env::{ENV_CONFIG_PATH, env_var_or_none};
use super::error::ConfigError;
use crate::constants::CONFIG_FILE_NAME;
use secrecy::SecretString;
use std::time::Duration;

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub skip_verify: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub search_debounce_ms: Option<u64>,
    pub auto_refresh_secs: Option<u64>,
}

/// Default config file location under the platform config directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("org", "kartoza", "geohosting")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| ConfigError::ConfigDirUnavailable("no home directory found".to_string()))
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply values from the config file to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let explicit = loader
        .config_path()
        .cloned()
        .or_else(|| env_var_or_none(ENV_CONFIG_PATH).map(PathBuf::from));

    let path = match explicit {
        Some(path) => path,
        None => {
            let path = match default_config_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping config file lookup");
                    return Ok(());
                }
            };
            if !path.exists() {
                return Ok(());
            }
            path
        }
    };

    tracing::debug!(path = %path.display(), "Loading config file");
    let file = read_file_config(&path)?;

    if file.base_url.is_some() {
        loader.set_base_url(file.base_url);
    }
    if let Some(token) = file.api_token {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if file.skip_verify.is_some() {
        loader.set_skip_verify(file.skip_verify);
    }
    if let Some(secs) = file.timeout_secs {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if file.page_size.is_some() {
        loader.set_page_size(file.page_size);
    }
    if file.search_debounce_ms.is_some() {
        loader.set_search_debounce_ms(file.search_debounce_ms);
    }
    if file.auto_refresh_secs.is_some() {
        loader.set_auto_refresh_secs(file.auto_refresh_secs);
    }
    Ok(())
}
