//! Deterministic generators for paginated collection data.

use serde_json::{Value, json};

use crate::models::Page;

/// Produces DRF-style pages over a virtual collection of `count` records.
#[derive(Debug, Clone)]
pub struct PageGenerator {
    count: u64,
    label: String,
}

impl PageGenerator {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            label: "record".to_string(),
        }
    }

    /// Prefix used for each record's `name` field.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The record with 1-based position `id`.
    pub fn record(&self, id: u64) -> Value {
        json!({
            "id": id,
            "name": format!("{}-{}", self.label, id),
        })
    }

    /// Page `page` (1-based) of size `page_size`. Out-of-range pages are empty.
    pub fn page(&self, page: u32, page_size: u32) -> Page {
        let size = u64::from(page_size);
        let start = u64::from(page.saturating_sub(1)) * size;
        let end = (start + size).min(self.count);
        let results = (start..end).map(|i| self.record(i + 1)).collect();
        let last_page = crate::models::total_pages(self.count, page_size);

        Page {
            count: self.count,
            next: (page < last_page).then(|| format!("?page={}", page + 1)),
            previous: (page > 1).then(|| format!("?page={}", page - 1)),
            results,
        }
    }
}
