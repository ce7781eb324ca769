//! Resources command: print the dashboard collection catalog.

use anyhow::Result;
use geohosting_client::Resource;

use crate::formatters::{OutputFormat, get_formatter, output_result};

pub fn run(output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let output = get_formatter(format).format_resources(&Resource::ALL)?;
    output_result(&output);
    Ok(())
}
