//! Network collaborators of the list controller and resource slices.
//!
//! Both traits are implemented by [`GeohostingClient`]; tests substitute
//! scripted fakes.

use std::future::Future;

use geohosting_client::{CancellationToken, ClientError, GeohostingClient, Page, Record};
use serde_json::Value;

/// Fetches one page of a collection.
pub trait ListFetcher: Send + Sync + 'static {
    /// GET `url` (a path + query or absolute URL). Resolves to
    /// [`ClientError::Cancelled`] once `cancel` fires.
    fn fetch_list(
        &self,
        url: &str,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Page, ClientError>> + Send;
}

/// Record-level operations on a collection.
pub trait RecordClient: Send + Sync + 'static {
    fn create_record(
        &self,
        collection: &str,
        body: &Value,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Record, ClientError>> + Send;

    fn fetch_record(
        &self,
        collection: &str,
        id: &str,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Record, ClientError>> + Send;

    fn update_record(
        &self,
        collection: &str,
        id: &str,
        body: &Value,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Record, ClientError>> + Send;

    fn delete_record(
        &self,
        collection: &str,
        id: &str,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

impl ListFetcher for GeohostingClient {
    async fn fetch_list(&self, url: &str, cancel: CancellationToken) -> Result<Page, ClientError> {
        self.list(url, &cancel).await
    }
}

impl RecordClient for GeohostingClient {
    async fn create_record(
        &self,
        collection: &str,
        body: &Value,
        cancel: CancellationToken,
    ) -> Result<Record, ClientError> {
        self.create(collection, body, &cancel).await
    }

    async fn fetch_record(
        &self,
        collection: &str,
        id: &str,
        cancel: CancellationToken,
    ) -> Result<Record, ClientError> {
        self.detail(collection, id, &cancel).await
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        body: &Value,
        cancel: CancellationToken,
    ) -> Result<Record, ClientError> {
        self.update(collection, id, body, &cancel).await
    }

    async fn delete_record(
        &self,
        collection: &str,
        id: &str,
        cancel: CancellationToken,
    ) -> Result<Value, ClientError> {
        self.delete(collection, id, &cancel).await
    }
}
