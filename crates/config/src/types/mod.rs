//! Configuration types for the GeoHosting console.
//!
//! Responsibilities:
//! - Define the resolved `Config` structure consumed by the client, console,
//!   and CLI crates.
//! - Provide serde helpers for durations and secrets so configs can be dumped
//!   and read back from JSON.
//!
//! Does NOT handle:
//! - Loading configuration from files or env (see `loader` module).
//! - Actual network connections (see client crate).

mod connection;
mod list;

pub use connection::{AuthConfig, Config, ConnectionConfig};
pub use list::ListDefaults;
