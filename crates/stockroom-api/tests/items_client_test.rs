// Integration tests for `ItemsClient` using wiremock.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockroom_api::types::{ItemRequest, RawId};
use stockroom_api::{Error, ItemsClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ItemsClient) {
    let server = MockServer::start().await;
    let client =
        ItemsClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new())
            .unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_items_sends_limit_and_offset() {
    let (server, client) = setup().await;

    let body = json!({
        "items": [
            { "id": "0b7d5a9e-3f7c-4c2e-9a53-2f0a1b4c6d8e", "name": "Widget", "price": 9.99,
              "created_at": "2024-05-01T12:00:00Z", "updated_at": "2024-05-01T12:00:00Z" },
            { "id": "5c1f3e0a-8a4d-4f7b-b1e2-7d9c0a2b3e4f", "name": "Gadget", "price": 0.5 },
        ],
        "total": 45,
        "limit": 20,
        "offset": 20
    });

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_items(20, 20).await.unwrap();

    assert_eq!(page.total, 45);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Widget");
    assert!(page.items[0].created_at.is_some());
    assert_eq!(page.items[1].price, 0.5);
    assert_eq!(page.offset, Some(20));
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let server = MockServer::start().await;
    let client =
        ItemsClient::from_reqwest(&format!("{}/api/", server.uri()), reqwest::Client::new())
            .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [], "total": 0 })))
        .mount(&server)
        .await;

    let page = client.list_items(20, 0).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_get_item() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/items/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 42, "name": "Bolt", "price": 1.25 })),
        )
        .mount(&server)
        .await;

    let item = client.get_item("42").await.unwrap();
    assert_eq!(item.id, RawId::Number(42));
    assert_eq!(item.name, "Bolt");
}

#[tokio::test]
async fn test_create_item_posts_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(body_json(json!({ "name": "Widget", "price": 9.99 })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": "abc", "name": "Widget", "price": 9.99 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_item(&ItemRequest {
            name: "Widget".into(),
            price: 9.99,
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.id, RawId::Text("abc".into()));
    assert_eq!(created.price, 9.99);
}

#[tokio::test]
async fn test_update_item_puts_to_item_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/items/abc"))
        .and(body_json(json!({ "name": "Renamed", "price": 3.0 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "abc", "name": "Renamed", "price": 3.0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_item(
            "abc",
            &ItemRequest {
                name: "Renamed".into(),
                price: 3.0,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
}

#[tokio::test]
async fn test_create_item_accepts_created_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_item(&ItemRequest {
            name: "Widget".into(),
            price: 9.99,
        })
        .await
        .unwrap();
    assert_eq!(created, None);
}

#[tokio::test]
async fn test_update_item_ignores_foreign_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/items/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_item(
            "abc",
            &ItemRequest {
                name: "Renamed".into(),
                price: 3.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated, None);
}

#[tokio::test]
async fn test_item_id_is_one_encoded_segment() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/items/a%2Fb%3Fc%23d"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_item("a/b?c#d").await.unwrap();
}

#[tokio::test]
async fn test_delete_item_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/items/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_item("abc").await.unwrap();
}

#[tokio::test]
async fn test_health_hits_server_origin() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health/ready"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Database unavailable\n"))
        .mount(&server)
        .await;

    assert_eq!(client.health(false).await.unwrap(), "OK");

    let err = client.health(true).await.unwrap_err();
    assert!(
        matches!(err, Error::Status { status: 503, ref body } if body == "Database unavailable"),
        "unexpected error: {err:?}"
    );
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_error_body_is_trimmed_message() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/items/abc"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate name\n"))
        .mount(&server)
        .await;

    let err = client
        .update_item(
            "abc",
            &ItemRequest {
                name: "Widget".into(),
                price: 1.0,
            },
        )
        .await
        .unwrap_err();

    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 409);
            assert_eq!(body, "duplicate name");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/items/abc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.delete_item("abc").await.unwrap_err();
    assert!(
        matches!(err, Error::Status { status: 500, ref body } if body.is_empty()),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/items/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Item not found\n"))
        .mount(&server)
        .await;

    let err = client.get_item("missing").await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client.list_items(20, 0).await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>proxy</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 9 (discard) is almost never listening.
    let client =
        ItemsClient::from_reqwest("http://127.0.0.1:9/api", reqwest::Client::new()).unwrap();

    let err = client.list_items(20, 0).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
