//! List synchronization core for the GeoHosting console.
//!
//! The [`ListSyncController`] drives a paginated, filterable, searchable
//! list view backed by a collection endpoint. It owns the query state,
//! decides when a fetch is warranted, and publishes [`ListState`] snapshots
//! through a `tokio::sync::watch` channel.
//!
//! [`ResourceSlice`] holds the create/detail/update/delete state of a
//! resource; a controller can follow it to refresh after mutations.

pub mod controller;
pub mod error;
pub mod fetcher;
pub mod inflight;
pub mod query;
pub mod session;
pub mod slice;
pub mod state;

pub use controller::{ListOptions, ListSyncController};
pub use error::ListError;
pub use fetcher::{ListFetcher, RecordClient};
pub use inflight::{Category, InFlightGuard, Ticket};
pub use query::{BaseUrl, Filters, ListQuery};
pub use session::RequestSession;
pub use slice::ResourceSlice;
pub use state::{CategoryState, ListState, SliceState};
