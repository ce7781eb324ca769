//! List synchronization controller.
//!
//! Responsibilities:
//! - Own the query state (page, search, filters) of one list view.
//! - Decide when a fetch is warranted and dispatch it through a [`ListFetcher`].
//! - Debounce search input, poll on an interval, and refresh after sibling
//!   create/update operations settle.
//!
//! Does NOT handle:
//! - HTTP transport (see `geohosting-client`).
//! - Rendering; consumers observe [`ListState`] through [`ListSyncController::subscribe`].
//!
//! # Invariants
//! - Every state mutation happens on the controller's own event loop task;
//!   the handle only sends commands, so setters never block
//! - At most one list fetch is in flight; starting one cancels the previous
//! - Superseded or cancelled completions never touch state
//! - After `configure` succeeds no operation returns an error; failures are
//!   published in [`ListState::error`]

mod runner;

use std::sync::Arc;
use std::time::Duration;

use geohosting_client::Resource;
use geohosting_config::ListDefaults;
use geohosting_config::constants::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

use crate::error::ListError;
use crate::fetcher::ListFetcher;
use crate::query::{BaseUrl, Filters, ListQuery};
use crate::state::{ListState, SliceState};

use runner::Runner;

/// Settings of one list view.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Collection URL: a bare path (`/api/orders/?is_main_invoice=True`) or
    /// an absolute `http(s)` URL. Its own query parameters are kept.
    pub base_url: String,
    pub page_size: u32,
    pub initial_filters: Filters,
    pub initial_search: String,
    /// Idle window before a search term is fetched.
    pub debounce: Duration,
    /// Poll interval; `None` disables auto-refresh.
    pub auto_refresh: Option<Duration>,
}

impl ListOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            initial_filters: Filters::new(),
            initial_search: String::new(),
            debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            auto_refresh: None,
        }
    }

    /// Options for a dashboard collection. The resource's fixed filters are
    /// baked into the base URL so that replacing filters never drops them.
    pub fn for_resource(resource: Resource) -> Self {
        let fixed = resource.default_filters();
        let base_url = if fixed.is_empty() {
            resource.path().to_string()
        } else {
            let query: Vec<String> = fixed.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}?{}", resource.path(), query.join("&"))
        };
        Self::new(base_url)
    }

    /// Apply page size, debounce, and auto-refresh from loaded configuration.
    pub fn with_defaults(mut self, defaults: &ListDefaults) -> Self {
        self.page_size = defaults.page_size;
        self.debounce = defaults.search_debounce();
        self.auto_refresh = defaults.auto_refresh();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.initial_filters = filters;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.initial_search = search.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_auto_refresh(mut self, interval: Option<Duration>) -> Self {
        self.auto_refresh = interval.filter(|d| !d.is_zero());
        self
    }
}

/// Messages from the handle to the event loop.
#[derive(Debug)]
pub(crate) enum Command {
    SetPage(u32),
    SetSearch(String),
    SetFilters(Filters),
    MutationSettled { succeeded: bool },
    AutoRefresh(Option<Duration>),
    Refresh,
}

/// Handle to a running list view.
///
/// Dropping the handle disposes the controller.
#[derive(Debug)]
pub struct ListSyncController {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ListState>,
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl ListSyncController {
    /// Validate `options`, start the event loop on the current tokio
    /// runtime, and issue the initial (non-forced) fetch.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPageSize`] for a zero page size,
    /// [`ListError::InvalidBaseUrl`] for an unusable base URL, and
    /// [`ListError::NoRuntime`] when called outside a tokio runtime.
    pub fn configure<F: ListFetcher>(fetcher: Arc<F>, options: ListOptions) -> Result<Self, ListError> {
        if options.page_size == 0 {
            return Err(ListError::InvalidPageSize);
        }
        let base = BaseUrl::parse(&options.base_url)?;
        tokio::runtime::Handle::try_current().map_err(|_| ListError::NoRuntime)?;

        let query = ListQuery::new(options.page_size)
            .with_search(options.initial_search)
            .with_filters(options.initial_filters);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ListState::new(query.clone()));
        let shutdown = CancellationToken::new();
        let tasks = TaskTracker::new();

        let mut runner = Runner::new(
            fetcher,
            base,
            query,
            state_tx,
            command_rx,
            shutdown.clone(),
            tasks.clone(),
            options.debounce,
        );
        runner.mount();
        runner.set_auto_refresh(options.auto_refresh);
        tasks.spawn(runner.run());

        Ok(Self {
            commands: command_tx,
            state: state_rx,
            shutdown,
            tasks,
        })
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("list controller already disposed; command dropped");
        }
    }

    /// Move to page `page` (1-based). Fetches only when the page count is
    /// known and `page` lies within it. Page 0 is rejected.
    pub fn set_page(&self, page: u32) {
        self.send(Command::SetPage(page));
    }

    /// Update the search term. Resets to page 1 and fetches after the
    /// debounce window, if no newer term arrived meanwhile.
    pub fn set_search_term(&self, search: impl Into<String>) {
        self.send(Command::SetSearch(search.into()));
    }

    /// Replace all filters. Resets to page 1 and fetches immediately.
    pub fn set_filters(&self, filters: Filters) {
        self.send(Command::SetFilters(filters));
    }

    /// A co-located create/update finished. On success the current query is
    /// re-fetched, bypassing deduplication.
    pub fn notify_sibling_mutation_settled(&self, succeeded: bool) {
        self.send(Command::MutationSettled { succeeded });
    }

    /// Poll every `interval_secs` seconds; `0` disables polling.
    pub fn enable_auto_refresh(&self, interval_secs: u64) {
        let interval = (interval_secs > 0).then(|| Duration::from_secs(interval_secs));
        self.send(Command::AutoRefresh(interval));
    }

    /// Re-fetch the current query, bypassing deduplication.
    pub fn refresh(&self) {
        self.send(Command::Refresh);
    }

    /// Refresh whenever the observed slice's create or update settles.
    ///
    /// Settles are counted by the slice, so a create that starts and
    /// finishes between two wakeups of the follower is still seen.
    pub fn follow_mutations(&self, mut slices: watch::Receiver<SliceState>) {
        let commands = self.commands.clone();
        let shutdown = self.shutdown.clone();
        let (mut settled, mut succeeded) = {
            let slice = slices.borrow_and_update();
            (slice.mutations_settled, slice.mutations_succeeded)
        };

        self.tasks.spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    changed = slices.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let (now_settled, now_succeeded) = {
                            let slice = slices.borrow_and_update();
                            (slice.mutations_settled, slice.mutations_succeeded)
                        };
                        if now_settled == settled {
                            continue;
                        }
                        let command = Command::MutationSettled {
                            succeeded: now_succeeded > succeeded,
                        };
                        settled = now_settled;
                        succeeded = now_succeeded;
                        if commands.send(command).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Receiver of every published state.
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.clone()
    }

    /// The latest published state.
    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Cancel the pending debounce, the auto-refresh timer, and any
    /// in-flight fetch, then stop the event loop.
    pub fn dispose(&self) {
        self.shutdown.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Dispose and wait for the event loop and its fetch tasks to exit.
    pub async fn shutdown(&self) {
        self.dispose();
        self.tasks.close();
        self.tasks.wait().await;
    }
}

impl Drop for ListSyncController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
