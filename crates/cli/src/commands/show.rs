//! Show command: fetch and print a single record.

use std::sync::Arc;

use anyhow::{Context, Result};
use geohosting_client::{CancellationToken, Resource};
use geohosting_config::Config;
use geohosting_console::ResourceSlice;
use tracing::info;

use crate::cancellation::Cancelled;
use crate::formatters::{OutputFormat, get_formatter, output_result};

pub async fn run(
    config: Config,
    resource: Resource,
    id: &str,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    info!("Fetching {} record {}", resource, id);

    let client = Arc::new(super::build_client_from_config(&config)?);
    let slice = ResourceSlice::for_resource(client, resource);

    tokio::select! {
        _ = slice.detail(id) => {}
        _ = cancel.cancelled() => {
            slice.cancel_all();
            return Err(Cancelled.into());
        }
    }

    let detail = slice.snapshot().detail;
    if let Some(err) = detail.error {
        return Err(anyhow::Error::new(err))
            .with_context(|| format!("Failed to get {} record '{}'", resource, id));
    }
    let record = detail
        .data
        .with_context(|| format!("No data returned for {} record '{}'", resource, id))?;

    let output = get_formatter(format).format_record(resource, &record)?;
    output_result(&output);
    Ok(())
}
