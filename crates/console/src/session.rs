//! Request deduplication by URL.

/// The last URL a list view accepted for dispatch.
///
/// This is the only deduplication mechanism: there is no content cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSession {
    last_url: Option<String>,
}

impl RequestSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `url` should be fetched. Forced calls always dispatch.
    pub fn should_dispatch(&self, url: &str, force: bool) -> bool {
        force || self.last_url.as_deref() != Some(url)
    }

    /// Record `url` as the last accepted request.
    pub fn accept(&mut self, url: impl Into<String>) {
        self.last_url = Some(url.into());
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// True once any request has been accepted.
    pub fn is_active(&self) -> bool {
        self.last_url.is_some()
    }
}
