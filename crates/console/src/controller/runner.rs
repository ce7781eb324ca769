//! The controller's event loop.
//!
//! One task per controller serializes every state change: handle commands,
//! fetch completions, the debounce deadline, and the auto-refresh deadline
//! are all selected in the same loop.

use std::sync::Arc;
use std::time::Duration;

use geohosting_client::{ClientError, Page};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use super::Command;
use crate::fetcher::ListFetcher;
use crate::inflight::{Category, InFlightGuard, Ticket};
use crate::query::{BaseUrl, ListQuery};
use crate::session::RequestSession;
use crate::state::ListState;

/// Result of a list fetch, sent back to the loop.
struct Completion {
    ticket: Ticket,
    url: String,
    result: Result<Page, ClientError>,
}

pub(super) struct Runner<F> {
    fetcher: Arc<F>,
    base: BaseUrl,
    query: ListQuery,
    session: RequestSession,
    guard: InFlightGuard,
    state: watch::Sender<ListState>,
    commands: mpsc::UnboundedReceiver<Command>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    shutdown: CancellationToken,
    tasks: TaskTracker,

    debounce: Duration,
    /// Pending search fetch and the search generation it was armed for.
    debounce_deadline: Option<(Instant, u64)>,
    /// Bumped on every accepted search change.
    search_generation: u64,
    /// Latest search generation some request already reflected.
    requested_generation: u64,

    auto_refresh: Option<Duration>,
    refresh_deadline: Option<Instant>,
}

impl<F: ListFetcher> Runner<F> {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        fetcher: Arc<F>,
        base: BaseUrl,
        query: ListQuery,
        state: watch::Sender<ListState>,
        commands: mpsc::UnboundedReceiver<Command>,
        shutdown: CancellationToken,
        tasks: TaskTracker,
        debounce: Duration,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            base,
            query,
            session: RequestSession::new(),
            guard: InFlightGuard::new(),
            state,
            commands,
            completions_tx,
            completions_rx,
            shutdown,
            tasks,
            debounce,
            debounce_deadline: None,
            search_generation: 0,
            requested_generation: 0,
            auto_refresh: None,
            refresh_deadline: None,
        }
    }

    /// Initial fetch of a freshly configured view.
    pub(super) fn mount(&mut self) {
        self.request(false, false);
    }

    pub(super) async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(done) = self.completions_rx.recv() => self.complete(done),
                _ = wait_until(self.debounce_deadline.map(|(at, _)| at)) => self.fire_debounce(),
                _ = wait_until(self.refresh_deadline) => self.fire_refresh(),
            }
        }
        self.teardown();
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SetPage(page) => self.set_page(page),
            Command::SetSearch(search) => self.set_search(search),
            Command::SetFilters(filters) => {
                self.query.filters = filters;
                self.query.page = 1;
                self.request(false, false);
            }
            Command::MutationSettled { succeeded } => {
                if succeeded && self.session.is_active() {
                    self.request(true, false);
                } else {
                    debug!(succeeded, "sibling mutation settled; no refresh");
                }
            }
            Command::AutoRefresh(interval) => self.set_auto_refresh(interval),
            Command::Refresh => self.request(true, false),
        }
    }

    fn set_page(&mut self, page: u32) {
        if page == 0 {
            warn!("ignoring request for page 0; pages are 1-based");
            return;
        }

        self.query.page = page;

        let total_pages = self.state.borrow().total_pages();
        match total_pages {
            Some(total) if page <= total => self.request(false, false),
            Some(total) => {
                self.publish_query();
                debug!(page, total, "page outside known bounds; not fetching");
            }
            None => {
                self.publish_query();
                debug!(page, "page count unknown; not fetching");
            }
        }
    }

    fn set_search(&mut self, search: String) {
        if search == self.query.search {
            return;
        }

        self.query.search = search;
        self.query.page = 1;
        self.publish_query();

        self.search_generation += 1;
        self.debounce_deadline = Some((Instant::now() + self.debounce, self.search_generation));
    }

    /// Fetch the debounced term, unless a newer term arrived or another
    /// request already carried it.
    fn fire_debounce(&mut self) {
        let Some((_, generation)) = self.debounce_deadline.take() else {
            return;
        };
        if generation == self.search_generation && generation > self.requested_generation {
            self.request(false, false);
        } else {
            debug!(
                generation,
                latest = self.search_generation,
                "stale search debounce discarded"
            );
        }
    }

    pub(super) fn set_auto_refresh(&mut self, interval: Option<Duration>) {
        self.auto_refresh = interval.filter(|d| !d.is_zero());
        self.refresh_deadline = None;
        self.arm_refresh();
    }

    /// Schedule the next poll, unless a fetch is still running; the poll is
    /// re-armed when that fetch completes.
    fn arm_refresh(&mut self) {
        if let Some(interval) = self.auto_refresh
            && !self.guard.is_active(Category::List)
        {
            self.refresh_deadline = Some(Instant::now() + interval);
        }
    }

    fn fire_refresh(&mut self) {
        self.refresh_deadline = None;
        self.request(true, true);
    }

    fn publish_query(&self) {
        let query = self.query.clone();
        self.state.send_modify(|state| state.query = query);
    }

    /// The fetch decision: build the URL, deduplicate, cancel the previous
    /// fetch, and dispatch. The query is published together with the
    /// loading flag, so observers never see a new query marked idle while
    /// its fetch is about to start.
    fn request(&mut self, force: bool, background: bool) {
        self.requested_generation = self.search_generation;
        let url = self.query.url_for(&self.base);
        if !self.session.should_dispatch(&url, force) {
            debug!(%url, "list request unchanged; skipping");
            self.publish_query();
            return;
        }

        self.session.accept(url.clone());
        let (ticket, cancel) = self.guard.begin(Category::List);

        let query = self.query.clone();
        self.state.send_modify(|state| {
            state.query = query;
            state.loading = true;
            state.background = background;
            state.error = None;
        });
        debug!(%url, force, background, seq = ticket.seq(), "dispatching list request");

        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions_tx.clone();
        self.tasks.spawn(async move {
            let result = fetcher.fetch_list(&url, cancel).await;
            if completions
                .send(Completion {
                    ticket,
                    url,
                    result,
                })
                .is_err()
            {
                debug!("list controller already disposed; completion dropped");
            }
        });
    }

    fn complete(&mut self, done: Completion) {
        if !self.guard.finish(&done.ticket) {
            debug!(url = %done.url, seq = done.ticket.seq(), "discarding superseded list response");
            return;
        }

        match done.result {
            Ok(page) => {
                debug!(url = %done.url, count = page.count, "list loaded");
                self.state.send_modify(|state| {
                    state.data = page;
                    state.loading = false;
                    state.background = false;
                    state.loaded = true;
                    state.error = None;
                });
            }
            Err(e) if e.is_cancelled() => {
                debug!(url = %done.url, "list request cancelled");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.background = false;
                });
            }
            Err(e) => {
                debug!(url = %done.url, error = %e, "list request failed");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.background = false;
                    state.error = Some(Arc::new(e));
                });
            }
        }

        self.arm_refresh();
    }

    fn teardown(&mut self) {
        self.guard.cancel_all();
        self.debounce_deadline = None;
        self.refresh_deadline = None;
        self.state.send_modify(|state| {
            state.loading = false;
            state.background = false;
        });
        debug!(base = %self.base, "list controller disposed");
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
