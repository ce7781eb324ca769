//! Cancellable request execution.
//!
//! Every request races its `CancellationToken`: when the token fires first
//! the in-flight future is dropped (which aborts the connection) and the call
//! resolves to [`ClientError::Cancelled`].
//!
//! # Invariants
//! - A token that is already cancelled short-circuits before any I/O
//! - Non-success responses always become [`ClientError::ApiError`], carrying
//!   the body as JSON when it parses and as a JSON string otherwise
//! - An empty success body is returned as `Value::Null`

use std::time::Instant;

use reqwest::RequestBuilder;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Labels describing one request, used for errors, logs, and metrics.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Full request URL.
    pub url: &'a str,
    /// Metric label, usually the collection path.
    pub endpoint: &'a str,
    pub method: &'static str,
}

/// Send a request and read its body, unless `cancel` fires first.
pub async fn send_cancellable(
    builder: RequestBuilder,
    ctx: RequestContext<'_>,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Value> {
    if cancel.is_cancelled() {
        return Err(ClientError::Cancelled);
    }

    if let Some(m) = metrics {
        m.record_request(ctx.endpoint, ctx.method);
    }
    let start = Instant::now();

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = execute(builder, ctx.url) => result,
    };

    if let Some(m) = metrics {
        match &outcome {
            Ok((status, _)) => {
                m.record_request_duration(ctx.endpoint, ctx.method, start.elapsed(), Some(*status))
            }
            Err(ClientError::Cancelled) => m.record_cancelled(ctx.endpoint, ctx.method),
            Err(e) => {
                m.record_request_duration(ctx.endpoint, ctx.method, start.elapsed(), e.status());
                m.record_client_error(ctx.endpoint, ctx.method, e);
            }
        }
    }

    match outcome {
        Ok((_, body)) => Ok(body),
        Err(ClientError::Cancelled) => {
            debug!(url = ctx.url, "request cancelled");
            Err(ClientError::Cancelled)
        }
        Err(e) => Err(e),
    }
}

async fn execute(builder: RequestBuilder, url: &str) -> Result<(u16, Value)> {
    let response = builder
        .send()
        .await
        .map_err(|e| ClientError::from_transport(e, url))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::from_transport(e, url))?;

    if status.is_success() {
        if text.trim().is_empty() {
            return Ok((status.as_u16(), Value::Null));
        }
        let body = serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("{} returned non-JSON body: {}", url, e))
        })?;
        Ok((status.as_u16(), body))
    } else {
        Err(ClientError::ApiError {
            status: status.as_u16(),
            url: url.to_string(),
            body: error_body(text),
        })
    }
}

/// Parse an error body as JSON, falling back to the raw text.
fn error_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
