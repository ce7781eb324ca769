//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main()`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geohosting_client::Resource;

use crate::commands;

#[derive(Parser)]
#[command(name = "geohosting-cli")]
#[command(about = "GeoHosting CLI - Browse GeoHosting console dashboards from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  geohosting-cli list orders\n  geohosting-cli list orders --search geonode --page 2\n  geohosting-cli list instances --filter status=Online --watch 10\n  geohosting-cli show instances 42 --output json\n  geohosting-cli resources\n"
)]
pub struct Cli {
    /// Base URL of the GeoHosting API (e.g., https://geohosting.sta.do)
    #[arg(short, long, global = true, env = "GEOHOSTING_BASE_URL")]
    pub base_url: Option<String>,

    /// API token sent as `Authorization: Token <token>`
    #[arg(short, long, global = true, env = "GEOHOSTING_API_TOKEN")]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "GEOHOSTING_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "GEOHOSTING_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Path to a custom configuration file (overrides default location).
    ///
    /// Can also be set via GEOHOSTING_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "GEOHOSTING_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of a dashboard collection
    List(commands::list::ListArgs),

    /// Show a single record
    Show {
        /// Collection (orders, instances, agreements, tickets)
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Record identifier
        id: String,
    },

    /// List the dashboard collections this CLI knows about
    Resources,
}

/// Parse a collection name into a [`Resource`].
pub fn parse_resource(s: &str) -> Result<Resource, String> {
    s.parse()
}

/// Parse a `key=value` filter. An empty value clears the filter.
pub fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{}': expected KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid filter '{}': key must not be empty", s));
    }
    Ok((key.to_string(), value.to_string()))
}
