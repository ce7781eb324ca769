//! Integration tests for configuration loading through the public API.
//!
//! These tests exercise the `ConfigLoader` builder chain the way the CLI
//! drives it: config file, then environment, then explicit overrides.

use geohosting_config::constants::{DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
use geohosting_config::{Config, ConfigError, ConfigLoader};
use secrecy::{ExposeSecret, SecretString};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_builder_overrides_produce_client_ready_config() {
    let config = ConfigLoader::new()
        .with_base_url("https://geohosting.example.org/".to_string())
        .with_api_token("cli-token".to_string())
        .with_page_size(25)
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "https://geohosting.example.org");
    assert_eq!(
        config.auth.token.as_ref().map(|t| t.expose_secret().to_string()),
        Some("cli-token".to_string())
    );
    assert_eq!(config.list.page_size, 25);
    assert_eq!(
        config.connection.timeout,
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    );
}

#[test]
fn test_config_file_then_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"base_url": "https://file.example.org", "api_token": "file-token", "timeout_secs": 12, "auto_refresh_secs": 30}}"#
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(file.path().to_path_buf())
        .from_file()
        .unwrap()
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "https://file.example.org");
    assert_eq!(config.connection.timeout, Duration::from_secs(5));
    assert_eq!(config.list.auto_refresh(), Some(Duration::from_secs(30)));
    assert_eq!(config.list.page_size, DEFAULT_PAGE_SIZE);
    assert!(config.has_token());
}

#[test]
fn test_missing_base_url_reports_env_var() {
    let err = ConfigLoader::new().build().unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseUrl));
    assert!(err.to_string().contains("GEOHOSTING_BASE_URL"));
}

#[test]
fn test_config_new_uses_list_defaults() {
    let config = Config::with_api_token(
        "https://geohosting.example.org",
        SecretString::new("t".to_string().into()),
    );
    assert_eq!(config.list.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.list.search_debounce(), Duration::from_millis(500));
    assert!(config.has_token());
}
