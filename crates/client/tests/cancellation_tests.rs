//! Cancellation tests.
//!
//! # Invariants
//! - Cancelling the token resolves an in-flight call to `ClientError::Cancelled`
//!   without waiting for the server
//! - A token cancelled before the call prevents the request from being sent

mod common;

use std::time::Duration;

use common::*;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_cancel_in_flight_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(PageGenerator::new(1).page(1, 10))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let cancel = CancellationToken::new();

    let handle = {
        let cancel = cancel.clone();
        tokio::spawn(async move { client.list("/api/orders/", &cancel).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("cancelled call should resolve promptly")
        .unwrap();

    assert!(matches!(result, Err(ClientError::Cancelled)));
}

#[tokio::test]
async fn test_pre_cancelled_token_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(PageGenerator::new(1).page(1, 10)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client_for(&mock_server).list("/api/orders/", &cancel).await;
    assert!(matches!(result, Err(ClientError::Cancelled)));
}
