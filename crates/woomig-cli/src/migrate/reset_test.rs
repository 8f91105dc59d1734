use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::super::testkit;
use super::{delete_all_media, reset_catalog};

async fn mount_list(server: &MockServer, collection: &str, docs: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{collection}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "docs": docs })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn reset_deletes_variations_then_products_then_media() {
    let cms = MockServer::start().await;
    let payload = testkit::payload_client(&cms).await;

    mount_list(&cms, "product-variations", serde_json::json!([{ "id": "var-1" }])).await;
    mount_list(
        &cms,
        "products",
        serde_json::json!([
            { "id": "prod-1", "slug": "red-shoe" },
            { "id": "prod-2", "slug": "blue-shoe" }
        ]),
    )
    .await;
    mount_list(&cms, "media", serde_json::json!([{ "id": "media-1", "filename": "shoe.jpg" }]))
        .await;

    for endpoint in [
        "/api/product-variations/var-1",
        "/api/products/prod-1",
        "/api/products/prod-2",
        "/api/media/media-1",
    ] {
        Mock::given(method("DELETE"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&cms)
            .await;
    }

    let outcome = reset_catalog(&payload).await.unwrap();
    assert_eq!(outcome.variations.deleted, 1);
    assert_eq!(outcome.products.deleted, 2);
    assert_eq!(outcome.media.deleted, 1);
    assert_eq!(outcome.products.failed, 0);
}

#[tokio::test]
async fn one_failed_delete_does_not_stop_the_purge() {
    let cms = MockServer::start().await;
    let payload = testkit::payload_client(&cms).await;

    mount_list(&cms, "product-variations", serde_json::json!([])).await;
    mount_list(
        &cms,
        "products",
        serde_json::json!([
            { "id": "prod-1", "slug": "red-shoe" },
            { "id": "prod-2", "slug": "blue-shoe" }
        ]),
    )
    .await;
    mount_list(&cms, "media", serde_json::json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/prod-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&cms)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/prod-2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&cms)
        .await;

    let outcome = reset_catalog(&payload).await.unwrap();
    assert_eq!(outcome.products.deleted, 1);
    assert_eq!(outcome.products.failed, 1);
}

#[tokio::test]
async fn delete_all_media_leaves_products_untouched() {
    let cms = MockServer::start().await;
    let payload = testkit::payload_client(&cms).await;

    mount_list(
        &cms,
        "media",
        serde_json::json!([
            { "id": "media-1", "filename": "a.jpg" },
            { "id": "media-2", "filename": "b.jpg" }
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/media/media-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&cms)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/media/media-2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&cms)
        .await;

    let stats = delete_all_media(&payload).await.unwrap();
    assert_eq!(stats.deleted, 2);
    assert_eq!(stats.failed, 0);
}

#[tokio::test]
async fn empty_collections_purge_cleanly() {
    let cms = MockServer::start().await;
    let payload = testkit::payload_client(&cms).await;

    for collection in ["product-variations", "products", "media"] {
        mount_list(&cms, collection, serde_json::json!([])).await;
    }

    let outcome = reset_catalog(&payload).await.unwrap();
    assert_eq!(outcome.variations.deleted, 0);
    assert_eq!(outcome.products.deleted, 0);
    assert_eq!(outcome.media.deleted, 0);
}
