//! Client builder for constructing [`GeohostingClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating the base URL and normalizing it (no trailing slash)
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`GeohostingClient`] methods in `mod.rs`)
//! - Loading configuration from files or environment (see `geohosting-config`)
//!
//! # Invariants
//! - `base_url` is required and must be an absolute `http(s)` URL
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::auth::AuthStrategy;
use crate::client::GeohostingClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use geohosting_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`GeohostingClient`].
pub struct GeohostingClientBuilder {
    base_url: Option<String>,
    auth_strategy: AuthStrategy,
    skip_verify: bool,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for GeohostingClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: AuthStrategy::Anonymous,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metrics: None,
        }
    }
}

impl GeohostingClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL, e.g. `https://geohosting.example.org`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = strategy;
        self
    }

    /// Authenticate with an API token.
    pub fn api_token(mut self, token: SecretString) -> Self {
        self.auth_strategy = AuthStrategy::Token { token };
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Record request metrics through the given collector.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.auth_strategy = AuthStrategy::from_token(config.auth.token.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`GeohostingClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not an
    /// absolute `http(s)` URL, and `ClientError::HttpError` if the HTTP
    /// client fails to build.
    pub fn build(self) -> Result<GeohostingClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let parsed = Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if parsed.scheme() == "https" {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(GeohostingClient {
            http,
            base_url,
            auth: self.auth_strategy,
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_with_api_token() {
        let config = Config::with_api_token(
            "https://geohosting.example.org",
            SecretString::new("test-token".to_string().into()),
        );

        let client = GeohostingClient::builder()
            .from_config(&config)
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://geohosting.example.org");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::new("https://geohosting.example.org");
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(120);

        let builder = GeohostingClient::builder().from_config(&config);

        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert!(!builder.auth_strategy.is_authenticated());
    }

    #[test]
    fn test_missing_base_url() {
        let result = GeohostingClient::builder().build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = GeohostingClient::builder()
            .base_url("ftp://geohosting.example.org".to_string())
            .build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_normalizes_trailing_slashes() {
        let client = GeohostingClient::builder()
            .base_url("https://geohosting.example.org//".to_string())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://geohosting.example.org");
    }

    #[test]
    fn test_skip_verify_with_http_url_still_builds() {
        let client = GeohostingClient::builder()
            .base_url("http://localhost:8000".to_string())
            .skip_verify(true)
            .build();
        assert!(client.is_ok());
    }
}
