//! List command implementation.
//!
//! Responsibilities:
//! - Drive a `ListSyncController` for one dashboard collection.
//! - Print the requested page once, or every refresh in `--watch` mode.
//!
//! Does NOT handle:
//! - Fetch deduplication, cancellation, or polling (see `geohosting-console`).
//! - Output formatting details (see formatters module).
//!
//! Invariants:
//! - Out-of-range pages are reported, never printed as stale data.
//! - In watch mode, Ctrl+C ends the command successfully.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Args;
use geohosting_client::{CancellationToken, Resource};
use geohosting_config::Config;
use geohosting_console::{Filters, ListOptions, ListState, ListSyncController};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::args::{parse_filter, parse_resource};
use crate::cancellation::Cancelled;
use crate::formatters::{Formatter, ListView, OutputFormat, get_formatter, output_result};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection (orders, instances, agreements, tickets)
    #[arg(value_parser = parse_resource)]
    pub resource: Resource,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Free-text search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter as KEY=VALUE; repeatable. Empty values are ignored.
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Keep running and re-print the page every SECS seconds
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
}

impl ListArgs {
    fn options(&self, config: &Config) -> ListOptions {
        let filters: Filters = self.filters.iter().cloned().collect();
        let mut options = ListOptions::for_resource(self.resource)
            .with_defaults(&config.list)
            .with_filters(filters)
            .with_search(self.search.clone().unwrap_or_default())
            .with_auto_refresh(self.watch.map(Duration::from_secs));
        if let Some(page_size) = self.page_size {
            options = options.with_page_size(page_size);
        }
        options
    }
}

pub async fn run(
    config: Config,
    args: ListArgs,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    info!(
        "Listing {} (page: {}, search: {:?})",
        args.resource, args.page, args.search
    );

    let client = Arc::new(super::build_client_from_config(&config)?);
    let controller = ListSyncController::configure(client, args.options(&config))?;
    let mut states = controller.subscribe();

    let mut state = settled(&mut states, 1, cancel).await?;
    fail_on_error(&state, args.resource)?;

    if args.page > 1 {
        controller.set_page(args.page);
        state = settled(&mut states, args.page, cancel).await?;
        fail_on_error(&state, args.resource)?;
    }

    if state.page_out_of_range() {
        let total = state.total_pages().unwrap_or(0);
        controller.shutdown().await;
        return Err(anyhow!(
            "Page {} is out of range: {} has {} page(s) for this query",
            args.page,
            args.resource,
            total
        ));
    }

    print_page(formatter.as_ref(), args.resource, &state)?;

    if args.watch.is_some() {
        watch_updates(formatter.as_ref(), args.resource, &mut states, cancel).await?;
    }

    controller.shutdown().await;
    Ok(())
}

/// Wait until the view shows `page` and no fetch is running.
async fn settled(
    states: &mut watch::Receiver<ListState>,
    page: u32,
    cancel: &CancellationToken,
) -> Result<ListState> {
    tokio::select! {
        state = states.wait_for(|s| s.query.page == page && !s.loading) => {
            let state = state.map_err(|_| anyhow!("List view stopped before loading"))?;
            Ok(state.clone())
        }
        _ = cancel.cancelled() => Err(Cancelled.into()),
    }
}

fn fail_on_error(state: &ListState, resource: Resource) -> Result<()> {
    match &state.error {
        Some(err) => Err(anyhow::Error::new(Arc::clone(err)).context(format!(
            "Failed to list {}",
            resource
        ))),
        None => Ok(()),
    }
}

fn print_page(formatter: &dyn Formatter, resource: Resource, state: &ListState) -> Result<()> {
    let view = ListView {
        resource,
        page: state.query.page,
        page_size: state.query.page_size,
        data: &state.data,
    };
    output_result(&formatter.format_list(&view)?);
    Ok(())
}

/// Print every completed refresh until Ctrl+C.
async fn watch_updates(
    formatter: &dyn Formatter,
    resource: Resource,
    states: &mut watch::Receiver<ListState>,
    cancel: &CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let state = states.borrow_and_update().clone();
                if state.loading {
                    continue;
                }
                match state.error_message() {
                    Some(message) => warn!("Refresh of {} failed: {}", resource, message),
                    None => {
                        println!();
                        print_page(formatter, resource, &state)?;
                    }
                }
            }
            _ = cancel.cancelled() => return Ok(()),
        }
    }
}
