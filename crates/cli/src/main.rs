//! GeoHosting CLI - command-line access to the console dashboards.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Drive list views through the shared list synchronization controller.
//! - Format and display records as tables or JSON.
//!
//! Does NOT handle:
//! - HTTP transport (see `crates/client`).
//! - Fetch scheduling, deduplication, or cancellation (see `crates/console`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries command output only.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;

use std::time::Duration;

use args::Cli;
use cancellation::{is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use geohosting_client::CancellationToken;
use geohosting_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Initialize metrics exporter if --metrics-bind is provided
    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match geohosting_client::MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind_addr);
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    // The resource catalog is static and needs no connection details
    let needs_config = !matches!(cli.command, args::Commands::Resources);

    let config = if needs_config {
        let mut loader = ConfigLoader::new();

        // Blank/whitespace-only values are ignored to allow fallback to env var
        if let Some(ref path) = cli.config_path {
            let path_str = path.to_string_lossy();
            if !path_str.trim().is_empty() {
                loader = loader.with_config_path(path.clone());
            }
        }

        loader = match loader.from_file().and_then(ConfigLoader::from_env) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to load configuration: {:#}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        };

        // Apply CLI overrides (highest priority)
        if let Some(ref url) = cli.base_url {
            loader = loader.with_base_url(url.clone());
        }
        if let Some(ref token) = cli.api_token {
            loader = loader.with_api_token(token.clone());
        }
        if let Some(timeout_secs) = cli.timeout {
            loader = loader.with_timeout(Duration::from_secs(timeout_secs));
        }
        if cli.skip_verify {
            loader = loader.with_skip_verify(true);
        }

        match loader.build() {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Failed to build configuration: {:#}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
