//! Main GeoHosting REST API client.
//!
//! This module provides [`GeohostingClient`], the handle used by the console
//! and CLI to talk to a GeoHosting server.
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Client configuration (handled by [`builder::GeohostingClientBuilder`])
//! - Deciding *when* to fetch (the console's list controller owns that)
//!
//! # Invariants
//! - Relative targets (`/api/orders/?page=1`) resolve against the base URL;
//!   absolute `http(s)` targets (pagination `next` links) are used as-is
//! - Every call takes a `CancellationToken` and resolves to
//!   [`ClientError::Cancelled`] once it fires

pub mod builder;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::AuthStrategy;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{Page, Record};

/// GeoHosting REST API client.
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use geohosting_client::{CancellationToken, GeohostingClient};
///
/// let client = GeohostingClient::builder()
///     .base_url("https://geohosting.example.org".to_string())
///     .build()?;
/// let page = client
///     .list("/api/orders/?page_size=10&page=1", &CancellationToken::new())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct GeohostingClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: AuthStrategy,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl GeohostingClient {
    /// Create a new client builder.
    pub fn builder() -> builder::GeohostingClientBuilder {
        builder::GeohostingClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Resolve a request target against the base URL.
    pub fn resolve_url(&self, target: &str) -> Result<Url> {
        let joined = if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else if target.starts_with('/') {
            format!("{}{}", self.base_url, target)
        } else {
            format!("{}/{}", self.base_url, target)
        };

        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    /// Fetch one page of a collection from a fully built list URL.
    pub async fn list(&self, target: &str, cancel: &CancellationToken) -> Result<Page> {
        let url = self.resolve_url(target)?;
        endpoints::list_page(&self.http, &url, &self.auth, cancel, self.metrics.as_ref()).await
    }

    /// Fetch a record by id from a collection path.
    pub async fn detail(
        &self,
        collection: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Record> {
        let url = self.resolve_url(&record_path(collection, id))?;
        endpoints::get_record(&self.http, &url, &self.auth, cancel, self.metrics.as_ref()).await
    }

    /// Create a record in a collection.
    pub async fn create(
        &self,
        collection: &str,
        body: &Value,
        cancel: &CancellationToken,
    ) -> Result<Record> {
        let url = self.resolve_url(collection)?;
        endpoints::create_record(
            &self.http,
            &url,
            &self.auth,
            body,
            cancel,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Replace a record in a collection.
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        body: &Value,
        cancel: &CancellationToken,
    ) -> Result<Record> {
        let url = self.resolve_url(&record_path(collection, id))?;
        endpoints::update_record(
            &self.http,
            &url,
            &self.auth,
            body,
            cancel,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Delete a record from a collection.
    pub async fn delete(
        &self,
        collection: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let url = self.resolve_url(&record_path(collection, id))?;
        endpoints::delete_record(&self.http, &url, &self.auth, cancel, self.metrics.as_ref())
            .await
    }
}

/// `<collection>/<id>/` with exactly one slash between segments.
pub(crate) fn record_path(collection: &str, id: &str) -> String {
    format!("{}/{}/", collection.trim_end_matches('/'), id.trim_matches('/'))
}
