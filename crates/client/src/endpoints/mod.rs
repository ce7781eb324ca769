//! REST API endpoint implementations.
//!
//! Endpoint functions are free functions over a `reqwest::Client`; the
//! [`crate::GeohostingClient`] methods wrap them with URL resolution and
//! authentication.

mod collection;
mod request;

pub use collection::{create_record, delete_record, get_record, list_page, update_record};
pub use request::{RequestContext, send_cancellable};
