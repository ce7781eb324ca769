//! Shared fakes and helpers for controller tests.
//!
//! # What this does NOT handle
//! - HTTP mocking (use wiremock directly in tests)

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use geohosting_client::testing::generators::PageGenerator;
use geohosting_client::{CancellationToken, ClientError, Page, Record};
use geohosting_console::{ListFetcher, RecordClient};
use serde_json::Value;
use tokio::sync::oneshot;

pub type ListReply = Result<Page, ClientError>;

type Responder = dyn Fn(&str) -> ListReply + Send + Sync;

/// Scripted list fetcher recording every URL it is asked for.
///
/// In instant mode each call is answered by a closure. In manual mode each
/// call parks until the test resolves it by index.
pub struct FakeFetcher {
    responder: Option<Box<Responder>>,
    honor_cancel: bool,
    calls: Mutex<Vec<String>>,
    replies: Mutex<Vec<Option<oneshot::Sender<ListReply>>>>,
}

impl FakeFetcher {
    /// Answer every call with a page over `count` records.
    pub fn instant(count: u64) -> Arc<Self> {
        Self::responding(move |url| Ok(PageGenerator::new(count).page(page_of(url), 10)))
    }

    pub fn responding(f: impl Fn(&str) -> ListReply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            responder: Some(Box::new(f)),
            honor_cancel: true,
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(Vec::new()),
        })
    }

    /// Park every call until [`FakeFetcher::resolve`].
    pub fn manual() -> Arc<Self> {
        Arc::new(Self::parked(true))
    }

    /// Like [`FakeFetcher::manual`], but calls ignore their cancellation
    /// token and resolve whenever the test says so.
    pub fn stubborn() -> Arc<Self> {
        Arc::new(Self::parked(false))
    }

    fn parked(honor_cancel: bool) -> Self {
        Self {
            responder: None,
            honor_cancel,
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Resolve parked call `index`. Returns false if it already finished.
    pub fn resolve(&self, index: usize, reply: ListReply) -> bool {
        let sender = self
            .replies
            .lock()
            .unwrap()
            .get_mut(index)
            .and_then(Option::take);
        match sender {
            Some(tx) => tx.send(reply).is_ok(),
            None => false,
        }
    }
}

impl ListFetcher for FakeFetcher {
    async fn fetch_list(&self, url: &str, cancel: CancellationToken) -> ListReply {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(responder) = &self.responder {
            return responder(url);
        }

        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push(Some(tx));

        if self.honor_cancel {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(ClientError::Cancelled),
                reply = rx => reply.unwrap_or(Err(ClientError::Cancelled)),
            }
        } else {
            rx.await.unwrap_or(Err(ClientError::Cancelled))
        }
    }
}

/// Page number in a list URL, defaulting to 1.
pub fn page_of(url: &str) -> u32 {
    url.split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

pub fn page_with_count(count: u64) -> Page {
    PageGenerator::new(count).page(1, 10)
}

pub type RecordReply = Result<Value, ClientError>;

/// Record client whose calls park until resolved in order.
#[derive(Default)]
pub struct GatedRecords {
    gates: Mutex<Vec<oneshot::Receiver<RecordReply>>>,
}

impl GatedRecords {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the gate for the next call.
    pub fn gate(&self) -> oneshot::Sender<RecordReply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push(rx);
        tx
    }

    async fn wait(&self, cancel: CancellationToken) -> RecordReply {
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            (!gates.is_empty()).then(|| gates.remove(0))
        };
        let Some(gate) = gate else {
            return Err(ClientError::InvalidResponse("no gate queued".into()));
        };
        tokio::select! {
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            reply = gate => reply.unwrap_or(Err(ClientError::Cancelled)),
        }
    }
}

impl RecordClient for GatedRecords {
    async fn create_record(&self, _: &str, _: &Value, cancel: CancellationToken) -> RecordReply {
        self.wait(cancel).await
    }

    async fn fetch_record(&self, _: &str, _: &str, cancel: CancellationToken) -> RecordReply {
        self.wait(cancel).await
    }

    async fn update_record(
        &self,
        _: &str,
        _: &str,
        _: &Value,
        cancel: CancellationToken,
    ) -> Result<Record, ClientError> {
        self.wait(cancel).await
    }

    async fn delete_record(&self, _: &str, _: &str, cancel: CancellationToken) -> RecordReply {
        self.wait(cancel).await
    }
}

/// Record client that answers every call without suspending.
pub struct InstantRecords {
    reply: fn() -> RecordReply,
}

impl InstantRecords {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            reply: || Ok(serde_json::json!({"id": 1})),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            reply: || {
                Err(ClientError::ApiError {
                    status: 400,
                    url: "/api/orders/".to_string(),
                    body: serde_json::json!({"detail": "Invalid order."}),
                })
            },
        })
    }
}

impl RecordClient for InstantRecords {
    async fn create_record(&self, _: &str, _: &Value, _: CancellationToken) -> RecordReply {
        (self.reply)()
    }

    async fn fetch_record(&self, _: &str, _: &str, _: CancellationToken) -> RecordReply {
        (self.reply)()
    }

    async fn update_record(
        &self,
        _: &str,
        _: &str,
        _: &Value,
        _: CancellationToken,
    ) -> Result<Record, ClientError> {
        (self.reply)()
    }

    async fn delete_record(&self, _: &str, _: &str, _: CancellationToken) -> RecordReply {
        (self.reply)()
    }
}

/// Let the controller's event loop and fetch tasks run to quiescence.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Advance Tokio's paused clock, then let woken tasks run.
pub async fn advance_and_settle(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}
