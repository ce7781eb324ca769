//! Error types for the GeoHosting client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during GeoHosting client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request was superseded or its owner went away.
    #[error("Request cancelled")]
    Cancelled,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response. `body` is the response JSON, or the raw text as a
    /// JSON string when the body is not JSON.
    #[error("API error ({status}) at {url}: {body}")]
    ApiError {
        status: u16,
        url: String,
        body: serde_json::Value,
    },

    /// Request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body did not match the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True for superseded requests; these are never shown to users.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `detail` message of a JSON error body (`{"detail": "..."}`).
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ApiError { body, .. } => body.get("detail").and_then(|d| d.as_str()),
            _ => None,
        }
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Classify a transport error from reqwest.
    pub(crate) fn from_transport(error: reqwest::Error, url: &str) -> Self {
        if error.is_timeout() {
            Self::Timeout(url.to_string())
        } else if error.is_connect() {
            Self::ConnectionRefused(url.to_string())
        } else {
            Self::HttpError(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(body: serde_json::Value) -> ClientError {
        ClientError::ApiError {
            status: 400,
            url: "http://localhost/api/orders/".to_string(),
            body,
        }
    }

    #[test]
    fn test_detail_from_json_body() {
        let err = api_error(json!({"detail": "Not found."}));
        assert_eq!(err.detail(), Some("Not found."));
    }

    #[test]
    fn test_detail_missing_for_field_errors() {
        let err = api_error(json!({"app_name": ["This field is required."]}));
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ClientError::Cancelled.is_cancelled());
        assert!(!ClientError::Timeout("x".into()).is_cancelled());
    }

    #[test]
    fn test_is_auth_error() {
        let err = ClientError::ApiError {
            status: 401,
            url: "http://localhost/api/instances/".to_string(),
            body: json!({"detail": "Invalid token."}),
        };
        assert!(err.is_auth_error());
        assert!(!api_error(json!(null)).is_auth_error());
    }

    #[test]
    fn test_display_includes_body() {
        let err = api_error(json!("plain text failure"));
        assert!(err.to_string().contains("plain text failure"));
        assert!(err.to_string().contains("400"));
    }
}
