//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - All commands receive the process-wide cancellation token.
//! - Commands that talk to the API always receive a built configuration.

use anyhow::{Result, anyhow};
use geohosting_client::CancellationToken;
use geohosting_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

pub(crate) async fn run_command(
    cli: Cli,
    config: Option<Config>,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Commands::Resources => commands::resources::run(&cli.output),
        Commands::List(args) => {
            let config = require_config(config)?;
            commands::list::run(config, args, &cli.output, cancel_token).await
        }
        Commands::Show { resource, id } => {
            let config = require_config(config)?;
            commands::show::run(config, resource, &id, &cli.output, cancel_token).await
        }
    }
}

fn require_config(config: Option<Config>) -> Result<Config> {
    config.ok_or_else(|| anyhow!("Configuration was not loaded for this command"))
}
