//! CLI command implementations.

pub mod list;
pub mod resources;
pub mod show;

use anyhow::Result;
use geohosting_client::{GeohostingClient, MetricsCollector};
use geohosting_config::Config;

/// Build a metrics-recording client from loaded configuration.
pub fn build_client_from_config(config: &Config) -> Result<GeohostingClient> {
    let client = GeohostingClient::builder()
        .from_config(config)
        .metrics(MetricsCollector::new())
        .build()?;
    Ok(client)
}
