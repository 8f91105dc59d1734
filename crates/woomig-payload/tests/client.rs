//! Integration tests for `PayloadClient` using wiremock HTTP mocks.

use woomig_payload::{NewCategory, PayloadClient, PayloadError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_partial_json(serde_json::json!({
            "email": "admin@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "test-token",
            "exp": 7_200
        })))
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> PayloadClient {
    PayloadClient::connect(&server.uri(), "admin@example.com", "hunter2", 30)
        .await
        .expect("login should succeed")
}

#[tokio::test]
async fn connect_logs_in_once_and_holds_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    // Every later call must carry the token from login.
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "docs": [] })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    client.find_category_by_slug("shoes").await.unwrap();
    client.find_category_by_slug("hats").await.unwrap();

    let logins = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/users/login")
        .count();
    assert_eq!(logins, 1, "login must happen exactly once per session");
}

#[tokio::test]
async fn connect_rejected_credentials_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{ "message": "The email or password provided is incorrect." }]
        })))
        .mount(&server)
        .await;

    let err = PayloadClient::connect(&server.uri(), "admin@example.com", "wrong", 30)
        .await
        .unwrap_err();

    match err {
        PayloadError::Auth { status, .. } => assert_eq!(status, 401),
        other => panic!("expected Auth, got: {other:?}"),
    }
}

#[tokio::test]
async fn find_category_by_slug_uses_where_filter() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(query_param("where[slug][equals]", "shoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": [{ "id": "cat1", "name": "Shoes", "slug": "shoes", "type": "product" }],
            "totalDocs": 1
        })))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let found = client.find_category_by_slug("shoes").await.unwrap();
    assert_eq!(found.unwrap().id, "cat1");
}

#[tokio::test]
async fn find_returns_none_when_no_docs_match() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "docs": [] })),
        )
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let found = client.find_product_by_slug("missing").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn create_category_unwraps_doc_envelope() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "name": "Shoes",
            "slug": "shoes",
            "type": "product"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "doc": { "id": "cat1", "name": "Shoes", "slug": "shoes", "type": "product" },
            "message": "Category successfully created."
        })))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let doc = client
        .create_category(&NewCategory {
            name: "Shoes".into(),
            slug: "shoes".into(),
            description: String::new(),
            r#type: "product".into(),
            parent: None,
        })
        .await
        .unwrap();
    assert_eq!(doc.id, "cat1");
}

#[tokio::test]
async fn create_failure_surfaces_validation_issues() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": [
                { "message": "The following field is invalid: slug", "data": [{ "field": "slug" }] }
            ]
        })))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let err = client
        .create_category(&NewCategory {
            name: "Bad".into(),
            slug: String::new(),
            description: String::new(),
            r#type: "product".into(),
            parent: None,
        })
        .await
        .unwrap_err();

    match err {
        PayloadError::Api { status, issues, .. } => {
            assert_eq!(status, 400);
            assert_eq!(issues, vec!["The following field is invalid: slug"]);
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn list_categories_of_type_passes_type_filter_and_limit() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(query_param("where[type][equals]", "product"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": [
                { "id": "cat1", "slug": "shoes" },
                { "id": "cat2", "slug": "hats" }
            ]
        })))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let docs = client.list_categories_of_type("product", 1000).await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].slug, "hats");
}

#[tokio::test]
async fn delete_hits_collection_id_path() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/media/m42"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "m42" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    client.delete_media("m42").await.unwrap();
}
