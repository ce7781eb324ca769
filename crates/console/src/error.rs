//! Error types for the console crate.

use thiserror::Error;

/// Errors raised while configuring a list view.
///
/// Once configured, a controller never returns errors; fetch failures are
/// published in [`crate::ListState::error`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("List controllers must be configured inside a tokio runtime")]
    NoRuntime,
}
