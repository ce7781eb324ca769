//! List view defaults shared by every paginated dashboard view.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_AUTO_REFRESH_SECS, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS,
};

/// Pagination, search, and polling settings for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDefaults {
    /// Rows requested per page (`page_size` query parameter).
    pub page_size: u32,
    /// Debounce window for free-text search, in milliseconds.
    pub search_debounce_ms: u64,
    /// Auto-refresh interval in seconds; 0 disables polling.
    pub auto_refresh_secs: u64,
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            auto_refresh_secs: DEFAULT_AUTO_REFRESH_SECS,
        }
    }
}

impl ListDefaults {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// The polling interval, or `None` when auto-refresh is disabled.
    pub fn auto_refresh(&self) -> Option<Duration> {
        (self.auto_refresh_secs > 0).then(|| Duration::from_secs(self.auto_refresh_secs))
    }
}
