//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Environment variables take precedence over config file settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Invalid numeric values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_BASE_URL: &str = "GEOHOSTING_BASE_URL";
pub const ENV_API_TOKEN: &str = "GEOHOSTING_API_TOKEN";
pub const ENV_SKIP_VERIFY: &str = "GEOHOSTING_SKIP_VERIFY";
pub const ENV_TIMEOUT: &str = "GEOHOSTING_TIMEOUT";
pub const ENV_PAGE_SIZE: &str = "GEOHOSTING_PAGE_SIZE";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "GEOHOSTING_SEARCH_DEBOUNCE_MS";
pub const ENV_AUTO_REFRESH_SECS: &str = "GEOHOSTING_AUTO_REFRESH_SECS";
pub const ENV_CONFIG_PATH: &str = "GEOHOSTING_CONFIG_PATH";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_BASE_URL) {
        loader.set_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none(ENV_API_TOKEN) {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = parse_env::<bool>(ENV_SKIP_VERIFY, "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(size) = parse_env::<u32>(ENV_PAGE_SIZE, "must be a positive integer")? {
        loader.set_page_size(Some(size));
    }
    if let Some(ms) = parse_env::<u64>(ENV_SEARCH_DEBOUNCE_MS, "must be a number of milliseconds")? {
        loader.set_search_debounce_ms(Some(ms));
    }
    if let Some(secs) = parse_env::<u64>(ENV_AUTO_REFRESH_SECS, "must be a number of seconds")? {
        loader.set_auto_refresh_secs(Some(secs));
    }
    Ok(())
}
