//! GeoHosting REST API client.
//!
//! This crate provides a cancellable, token-authenticated client for the
//! GeoHosting collection endpoints (orders, instances, agreements, tickets)
//! used by the console's list views.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod resources;
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::AuthStrategy;
pub use client::GeohostingClient;
pub use client::builder::GeohostingClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{Page, Record};
pub use resources::Resource;
pub use tokio_util::sync::CancellationToken;
