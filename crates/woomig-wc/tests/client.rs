//! Integration tests for `WcClient` using wiremock HTTP mocks.

use woomig_wc::{WcClient, WcError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> WcClient {
    WcClient::new(base_url, "ck_test", "cs_test", 30).expect("client construction should not fail")
}

#[tokio::test]
async fn list_categories_parses_page() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "id": 5, "name": "Shoes", "slug": "shoes", "description": "", "parent": 0 },
        { "id": 9, "name": "Running", "slug": "running", "parent": 5 }
    ]);

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/categories"))
        .and(query_param("consumer_key", "ck_test"))
        .and(query_param("consumer_secret", "cs_test"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let categories = client.list_categories(100).await.expect("should parse");

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].slug, "shoes");
    assert_eq!(categories[0].parent, 0);
    assert_eq!(categories[1].parent, 5);
    // `description` was absent on the second record; defaults to empty.
    assert_eq!(categories[1].description, "");
}

#[tokio::test]
async fn list_products_parses_sparse_product() {
    let server = MockServer::start().await;

    // Minimal product: most fields absent, stock_quantity null.
    let body = serde_json::json!([
        {
            "id": 42,
            "name": "Red Shoe",
            "slug": "red-shoe",
            "type": "simple",
            "regular_price": "100000",
            "sale_price": "",
            "stock_quantity": null,
            "stock_status": "instock",
            "categories": [{ "id": 5, "name": "Shoes", "slug": "shoes" }]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products(1, 20).await.expect("should parse");

    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert_eq!(p.id, 42);
    assert_eq!(p.regular_price, "100000");
    assert_eq!(p.sale_price, "");
    assert_eq!(p.stock_quantity, None);
    assert!(p.images.is_empty());
    assert!(p.meta_data.is_empty());
    assert_eq!(p.categories[0].id, 5);
}

#[tokio::test]
async fn list_products_empty_page_returns_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products(7, 20).await.expect("should parse");
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_variations_parses_attributes_and_image() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": 101,
            "attributes": [
                { "id": 1, "name": "Size", "option": "42" },
                { "id": 2, "name": "Color", "option": "Red" }
            ],
            "regular_price": "120000",
            "sale_price": "99000",
            "sku": "RS-42-R",
            "stock_quantity": 3,
            "stock_status": "instock",
            "image": { "id": 7, "src": "https://legacy.example.com/wp-content/uploads/shoe.jpg" }
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/42/variations"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let variations = client.list_variations(42, 100).await.expect("should parse");

    assert_eq!(variations.len(), 1);
    let v = &variations[0];
    assert_eq!(v.attributes.len(), 2);
    assert_eq!(v.attributes[0].name, "Size");
    assert_eq!(v.attributes[0].option, "42");
    assert_eq!(v.stock_quantity, Some(3));
    assert!(v.image.as_ref().is_some_and(|i| i.src.ends_with("shoe.jpg")));
}

#[tokio::test]
async fn list_attribute_terms_hits_nested_path() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "id": 11, "name": "Red", "slug": "red" },
        { "id": 12, "name": "Blue", "slug": "blue" }
    ]);

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/attributes/3/terms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let terms = client.list_attribute_terms(3, 100).await.expect("should parse");
    assert_eq!(terms.len(), 2);
    assert_eq!(terms[1].name, "Blue");
}

#[tokio::test]
async fn non_2xx_surfaces_status_with_redacted_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "code": "woocommerce_rest_cannot_view" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products(1, 20).await.unwrap_err();

    match err {
        WcError::UnexpectedStatus { status, url, body } => {
            assert_eq!(status, 401);
            assert!(!url.contains("cs_test"), "secret leaked into error: {url}");
            assert!(body.contains("woocommerce_rest_cannot_view"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/attributes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_attributes().await.unwrap_err();
    assert!(matches!(err, WcError::Deserialize { .. }), "got: {err:?}");
}
