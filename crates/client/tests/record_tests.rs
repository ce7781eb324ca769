//! Record endpoint tests (detail, create, update, delete).

mod common;

use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_detail_uses_record_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/instances/7/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("instances/instance_detail.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = client_for(&mock_server)
        .detail("/api/instances/", "7", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(record["name"], "geonode-demo");
}

#[tokio::test]
async fn test_create_posts_json_body() {
    let mock_server = MockServer::start().await;
    let body = json!({"subject": "Instance down", "details": "502 on login"});

    Mock::given(method("POST"))
        .and(path("/api/tickets/"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3, "status": "open"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = client_for(&mock_server)
        .create("/api/tickets/", &body, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(created["id"], 3);
}

#[tokio::test]
async fn test_update_puts_to_record() {
    let mock_server = MockServer::start().await;
    let body = json!({"status": "closed"});

    Mock::given(method("PUT"))
        .and(path("/api/tickets/3/"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "status": "closed"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let updated = client_for(&mock_server)
        .update("/api/tickets/", "3", &body, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(updated["status"], "closed");
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/tickets/3/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client_for(&mock_server)
        .delete("/api/tickets/", "3", &CancellationToken::new())
        .await
        .unwrap();

    assert!(body.is_null());
}
