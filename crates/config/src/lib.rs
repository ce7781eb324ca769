//! Configuration management for the GeoHosting console.
//!
//! This crate provides the constants, types, and loaders used to resolve the
//! console's connection and list-view settings from defaults, a JSON config
//! file, environment variables, and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, Config, ConnectionConfig, ListDefaults};
