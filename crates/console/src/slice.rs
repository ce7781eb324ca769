//! Per-resource state for create, detail, update, and delete operations.
//!
//! Responsibilities:
//! - Run record operations against one collection.
//! - Keep one [`CategoryState`](crate::CategoryState) per operation kind.
//!
//! Does NOT handle:
//! - Listing (see [`crate::ListSyncController`], which can follow a slice
//!   to refresh after its mutations).
//!
//! # Invariants
//! - Starting an operation cancels the previous one of the same category
//! - Only the latest operation of a category writes its state
//! - Operations never return errors; failures land in the category's `error`

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use geohosting_client::{ClientError, Resource};
use serde_json::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::fetcher::RecordClient;
use crate::inflight::{Category, InFlightGuard};
use crate::state::SliceState;

struct Inner<C> {
    client: Arc<C>,
    collection: String,
    guard: Mutex<InFlightGuard>,
    state: watch::Sender<SliceState>,
}

/// Record operations and their observable state for one collection.
///
/// Cloning yields another handle to the same slice.
pub struct ResourceSlice<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for ResourceSlice<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: RecordClient> ResourceSlice<C> {
    pub fn new(client: Arc<C>, collection: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SliceState::default());
        Self {
            inner: Arc::new(Inner {
                client,
                collection: collection.into(),
                guard: Mutex::new(InFlightGuard::new()),
                state,
            }),
        }
    }

    pub fn for_resource(client: Arc<C>, resource: Resource) -> Self {
        Self::new(client, resource.path())
    }

    pub fn collection(&self) -> &str {
        &self.inner.collection
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> SliceState {
        self.inner.state.borrow().clone()
    }

    pub async fn create(&self, body: Value) {
        let inner = &self.inner;
        self.run(Category::Create, |cancel| async move {
            inner
                .client
                .create_record(&inner.collection, &body, cancel)
                .await
        })
        .await
    }

    pub async fn detail(&self, id: &str) {
        let inner = &self.inner;
        self.run(Category::Detail, |cancel| async move {
            inner.client.fetch_record(&inner.collection, id, cancel).await
        })
        .await
    }

    pub async fn update(&self, id: &str, body: Value) {
        let inner = &self.inner;
        self.run(Category::Update, |cancel| async move {
            inner
                .client
                .update_record(&inner.collection, id, &body, cancel)
                .await
        })
        .await
    }

    pub async fn delete(&self, id: &str) {
        let inner = &self.inner;
        self.run(Category::Delete, |cancel| async move {
            inner.client.delete_record(&inner.collection, id, cancel).await
        })
        .await
    }

    /// Cancel every in-flight operation. Their states keep their last values.
    pub fn cancel_all(&self) {
        self.guard().cancel_all();
        self.inner.state.send_modify(|state| {
            for category in Category::ALL {
                if let Some(slot) = state.category_mut(category) {
                    slot.loading = false;
                }
            }
        });
    }

    fn guard(&self) -> MutexGuard<'_, InFlightGuard> {
        self.inner
            .guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn run<Op, Fut>(&self, category: Category, op: Op)
    where
        Op: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<Value, ClientError>>,
    {
        let (ticket, cancel) = self.guard().begin(category);
        self.inner.state.send_modify(|state| {
            if let Some(slot) = state.category_mut(category) {
                slot.loading = true;
                slot.error = None;
            }
        });

        let result = op(cancel).await;

        if !self.guard().finish(&ticket) {
            debug!(%category, seq = ticket.seq(), "discarding superseded result");
            return;
        }

        let mutation = matches!(category, Category::Create | Category::Update);
        self.inner.state.send_modify(|state| {
            let Some(slot) = state.category_mut(category) else {
                return;
            };
            slot.loading = false;
            let settled = match result {
                Ok(data) => {
                    slot.data = Some(data);
                    slot.error = None;
                    Some(true)
                }
                Err(e) if e.is_cancelled() => None,
                Err(e) => {
                    slot.error = Some(Arc::new(e));
                    Some(false)
                }
            };
            if let Some(succeeded) = settled
                && mutation
            {
                state.record_mutation_settled(succeeded);
            }
        });
    }
}
