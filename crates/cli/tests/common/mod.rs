//! Shared test utilities for geohosting-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv and config file loading.
//!
//! Invariants / Assumptions:
//! - `GEOHOSTING_API_TOKEN` is set to "test-token" unless overridden.
//! - The platform config directory points at a path that does not exist.

use assert_cmd::Command;

/// Returns a hermetic `geohosting-cli` command for integration testing.
pub fn geohosting_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("geohosting-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("GEOHOSTING_API_TOKEN", "test-token");

    // Keep the host's config file out of reach
    let home = std::env::temp_dir().join("geohosting-cli-tests-home");
    cmd.env("HOME", &home).env("XDG_CONFIG_HOME", home.join(".config"));

    cmd.env_remove("GEOHOSTING_BASE_URL")
        .env_remove("GEOHOSTING_CONFIG_PATH")
        .env_remove("GEOHOSTING_TIMEOUT")
        .env_remove("GEOHOSTING_SKIP_VERIFY")
        .env_remove("GEOHOSTING_PAGE_SIZE")
        .env_remove("GEOHOSTING_SEARCH_DEBOUNCE_MS")
        .env_remove("GEOHOSTING_AUTO_REFRESH_SECS");

    cmd
}

/// Returns a hermetic `geohosting-cli` command with a specific base URL.
#[allow(dead_code)]
pub fn geohosting_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = geohosting_cmd();
    cmd.env("GEOHOSTING_BASE_URL", base_url);
    cmd
}
