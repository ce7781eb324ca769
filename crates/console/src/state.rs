//! Observable state of list views and resource slices.

use std::sync::Arc;

use geohosting_client::{ClientError, Page, Record};
use serde_json::Value;

use crate::inflight::Category;
use crate::query::ListQuery;

/// Snapshot of a list view, published after every change.
#[derive(Debug, Clone)]
pub struct ListState {
    /// Query the view currently reflects (page, search, filters).
    pub query: ListQuery,
    /// Last successfully loaded page. Kept while a new page loads.
    pub data: Page,
    pub loading: bool,
    /// The in-flight fetch was started by auto-refresh.
    pub background: bool,
    /// At least one load has completed successfully.
    pub loaded: bool,
    /// Last failure, stored verbatim. Cleared when a fetch starts.
    pub error: Option<Arc<ClientError>>,
}

impl ListState {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            data: Page::default(),
            loading: false,
            background: false,
            loaded: false,
            error: None,
        }
    }

    /// Whether a loading indicator should be shown. Auto-refresh polls do
    /// not blank the list.
    pub fn show_spinner(&self) -> bool {
        self.loading && !self.background
    }

    /// Known page count, once a page has loaded.
    pub fn total_pages(&self) -> Option<u32> {
        self.loaded.then(|| self.data.total_pages(self.query.page_size))
    }

    /// The current page lies outside the loaded bounds.
    pub fn page_out_of_range(&self) -> bool {
        self.total_pages().is_some_and(|total| self.query.page > total)
    }

    /// Whether the load finished and nothing matched.
    pub fn is_empty(&self) -> bool {
        self.loaded && !self.loading && self.data.count == 0
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_deref().map(render_error)
    }
}

/// State of one non-list operation category.
#[derive(Debug, Clone, Default)]
pub struct CategoryState {
    pub loading: bool,
    pub data: Option<Record>,
    pub error: Option<Arc<ClientError>>,
}

impl CategoryState {
    /// User-facing error text, preferring the server's `detail` message.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_deref().map(render_error)
    }

    pub fn succeeded(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

/// Create/detail/update/delete state of one resource.
#[derive(Debug, Clone, Default)]
pub struct SliceState {
    pub create: CategoryState,
    pub detail: CategoryState,
    pub update: CategoryState,
    pub delete: CategoryState,
    /// Creates and updates that ran to completion, successful or not.
    /// Cancelled and superseded operations are not counted.
    pub mutations_settled: u64,
    /// The subset of `mutations_settled` that succeeded.
    pub mutations_succeeded: u64,
}

impl SliceState {
    /// State of a non-list category. `List` has no slot here.
    pub fn category(&self, category: Category) -> Option<&CategoryState> {
        match category {
            Category::List => None,
            Category::Create => Some(&self.create),
            Category::Detail => Some(&self.detail),
            Category::Update => Some(&self.update),
            Category::Delete => Some(&self.delete),
        }
    }

    pub(crate) fn category_mut(&mut self, category: Category) -> Option<&mut CategoryState> {
        match category {
            Category::List => None,
            Category::Create => Some(&mut self.create),
            Category::Detail => Some(&mut self.detail),
            Category::Update => Some(&mut self.update),
            Category::Delete => Some(&mut self.delete),
        }
    }

    /// A create or update is running.
    pub fn mutation_loading(&self) -> bool {
        self.create.loading || self.update.loading
    }

    pub fn mutation_failed(&self) -> bool {
        self.create.error.is_some() || self.update.error.is_some()
    }

    pub(crate) fn record_mutation_settled(&mut self, succeeded: bool) {
        self.mutations_settled += 1;
        if succeeded {
            self.mutations_succeeded += 1;
        }
    }
}

fn render_error(error: &ClientError) -> String {
    if let Some(detail) = error.detail() {
        return detail.to_string();
    }
    match error {
        ClientError::ApiError {
            body: Value::String(text),
            ..
        } => text.clone(),
        other => other.to_string(),
    }
}
