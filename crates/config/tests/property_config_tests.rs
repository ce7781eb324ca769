//! Property-based tests for configuration validation.
//!
//! Test coverage:
//! - Base URL normalization never leaves a trailing slash and is idempotent.
//! - Page sizes inside the accepted range always build; zero never does.
//! - Config JSON roundtrip preserves connection and list settings.

use geohosting_config::constants::MAX_PAGE_SIZE;
use geohosting_config::{Config, ConfigLoader};
use proptest::prelude::*;

/// Strategy for generating valid base URLs.
fn base_url_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("http"), Just("https")],
        "[a-z][a-z0-9-]{0,15}(\\.[a-z]{2,6}){1,2}",
        proptest::option::of(1024u16..65535),
        prop_oneof![Just(""), Just("/"), Just("/console"), Just("/console/")],
    )
        .prop_map(|(scheme, host, port, path)| match port {
            Some(port) => format!("{}://{}:{}{}", scheme, host, port, path),
            None => format!("{}://{}{}", scheme, host, path),
        })
}

proptest! {
    #[test]
    fn prop_base_url_is_normalized(url in base_url_strategy()) {
        let config = ConfigLoader::new().with_base_url(url).build().unwrap();
        let base = config.connection.base_url.clone();
        prop_assert!(!base.ends_with('/'));

        let again = ConfigLoader::new().with_base_url(base.clone()).build().unwrap();
        prop_assert_eq!(again.connection.base_url, base);
    }

    #[test]
    fn prop_page_size_in_range_builds(page_size in 1u32..=MAX_PAGE_SIZE) {
        let config = ConfigLoader::new()
            .with_base_url("https://geohosting.example.org".to_string())
            .with_page_size(page_size)
            .build()
            .unwrap();
        prop_assert_eq!(config.list.page_size, page_size);
    }

    #[test]
    fn prop_config_json_roundtrip(url in base_url_strategy(), timeout in 1u64..3600, refresh in 0u64..3600) {
        let mut config = Config::new(url);
        config.connection.timeout = std::time::Duration::from_secs(timeout);
        config.list.auto_refresh_secs = refresh;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(parsed.connection.base_url, config.connection.base_url);
        prop_assert_eq!(parsed.connection.timeout, config.connection.timeout);
        prop_assert_eq!(parsed.list, config.list);
    }
}

#[test]
fn test_zero_page_size_never_builds() {
    let result = ConfigLoader::new()
        .with_base_url("https://geohosting.example.org".to_string())
        .with_page_size(0)
        .build();
    assert!(result.is_err());
}
