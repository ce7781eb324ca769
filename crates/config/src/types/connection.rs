//! Connection and authentication configuration types.
//!
//! Invariants:
//! - Duration fields are serialized as whole seconds.
//! - The API token is held in a `SecretString` and never appears in `Debug` output.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::list::ListDefaults;
use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing an optional SecretString as a plain string.
mod optional_secret {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret
            .as_ref()
            .map(|s| s.expose_secret().to_string())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|s| SecretString::new(s.into())))
    }
}

/// Connection settings for the GeoHosting API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server root (e.g. `https://geohosting.example.org`), no trailing slash.
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

/// Authentication settings.
///
/// The API accepts an optional `Authorization: Token <token>` header; anonymous
/// requests are allowed for public collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, with = "optional_secret")]
    pub token: Option<SecretString>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub list: ListDefaults,
}

impl Config {
    /// Create a config for the given server with default timeouts and list settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: base_url.into(),
                skip_verify: false,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            auth: AuthConfig::default(),
            list: ListDefaults::default(),
        }
    }

    /// Same as [`Config::new`] with an API token attached.
    pub fn with_api_token(base_url: impl Into<String>, token: SecretString) -> Self {
        let mut config = Self::new(base_url);
        config.auth.token = Some(token);
        config
    }

    /// True when requests will carry an authorization header.
    pub fn has_token(&self) -> bool {
        self.auth.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_json_roundtrip_keeps_token() {
        let config = Config::with_api_token(
            "https://geohosting.example.org",
            SecretString::new("abc123".to_string().into()),
        );

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.connection.base_url, "https://geohosting.example.org");
        assert_eq!(parsed.connection.timeout, Duration::from_secs(30));
        assert_eq!(
            parsed.auth.token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let config = Config::with_api_token(
            "https://geohosting.example.org",
            SecretString::new("super-secret".to_string().into()),
        );

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_missing_auth_and_list_sections_use_defaults() {
        let json = r#"{"connection":{"base_url":"http://localhost:8000","skip_verify":false,"timeout":10}}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert!(!parsed.has_token());
        assert_eq!(parsed.list.page_size, 10);
    }
}
