//! Centralized constants for the GeoHosting console workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Scheme prefix used by the API for token authentication headers.
pub const AUTH_TOKEN_SCHEME: &str = "Token";

// =============================================================================
// List View Defaults
// =============================================================================

/// Rows per page for every dashboard list view.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound accepted for a configured page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Quiet window before a typed search term is sent, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Auto-refresh interval in seconds; 0 disables polling.
pub const DEFAULT_AUTO_REFRESH_SECS: u64 = 0;

/// Maximum allowed auto-refresh interval in seconds (1 hour).
pub const MAX_AUTO_REFRESH_SECS: u64 = 3600;

// =============================================================================
// Environment & Files
// =============================================================================

/// File name of the JSON config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
