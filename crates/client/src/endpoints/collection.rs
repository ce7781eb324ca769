//! Collection and record endpoints.
//!
//! GeoHosting exposes Django REST Framework style resources: a paginated
//! collection at `/api/<resource>/` and records at `/api/<resource>/<id>/`.

use reqwest::Client;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::AuthStrategy;
use crate::endpoints::request::{RequestContext, send_cancellable};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{Page, Record};

/// Fetch one page of a collection. `url` already carries the query string.
pub async fn list_page(
    client: &Client,
    url: &Url,
    auth: &AuthStrategy,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Page> {
    let builder = auth.apply(client.get(url.clone()));
    let body = send_cancellable(builder, context(url, "GET"), cancel, metrics).await?;

    serde_json::from_value(body).map_err(|e| {
        ClientError::InvalidResponse(format!("{} did not return a page: {}", url, e))
    })
}

/// Fetch a single record.
pub async fn get_record(
    client: &Client,
    url: &Url,
    auth: &AuthStrategy,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Record> {
    let builder = auth.apply(client.get(url.clone()));
    send_cancellable(builder, context(url, "GET"), cancel, metrics).await
}

/// Create a record in a collection.
pub async fn create_record(
    client: &Client,
    url: &Url,
    auth: &AuthStrategy,
    body: &Value,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Record> {
    let builder = auth.apply(client.post(url.clone()).json(body));
    send_cancellable(builder, context(url, "POST"), cancel, metrics).await
}

/// Replace a record.
pub async fn update_record(
    client: &Client,
    url: &Url,
    auth: &AuthStrategy,
    body: &Value,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Record> {
    let builder = auth.apply(client.put(url.clone()).json(body));
    send_cancellable(builder, context(url, "PUT"), cancel, metrics).await
}

/// Delete a record. The (usually empty) response body is returned as-is.
pub async fn delete_record(
    client: &Client,
    url: &Url,
    auth: &AuthStrategy,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Value> {
    let builder = auth.apply(client.delete(url.clone()));
    send_cancellable(builder, context(url, "DELETE"), cancel, metrics).await
}

fn context<'a>(url: &'a Url, method: &'static str) -> RequestContext<'a> {
    RequestContext {
        url: url.as_str(),
        endpoint: url.path(),
        method,
    }
}
