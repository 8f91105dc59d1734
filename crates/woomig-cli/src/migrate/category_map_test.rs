use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::super::testkit;
use super::build_category_map;

#[tokio::test]
async fn matched_slugs_are_mapped_and_unmatched_are_absent() {
    let wc = MockServer::start().await;
    let cms = MockServer::start().await;
    let payload = testkit::payload_client(&cms).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 5, "name": "Shoes", "slug": "shoes", "parent": 0 },
            { "id": 6, "name": "Hats", "slug": "hats", "parent": 0 },
            { "id": 7, "name": "Never Migrated", "slug": "never-migrated", "parent": 0 }
        ])))
        .mount(&wc)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(query_param("where[type][equals]", "product"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": [
                { "id": "cat-shoes", "slug": "shoes" },
                { "id": "cat-hats", "slug": "hats" },
                { "id": "cat-posts", "slug": "never-migrated-elsewhere" }
            ]
        })))
        .mount(&cms)
        .await;

    let map = build_category_map(&testkit::wc_client(&wc), &payload)
        .await
        .unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&5).map(String::as_str), Some("cat-shoes"));
    assert_eq!(map.get(&6).map(String::as_str), Some("cat-hats"));
    assert!(!map.contains_key(&7), "unmatched slug must be absent, not null");
}

#[tokio::test]
async fn empty_target_yields_empty_map() {
    let wc = MockServer::start().await;
    let cms = MockServer::start().await;
    let payload = testkit::payload_client(&cms).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 5, "name": "Shoes", "slug": "shoes", "parent": 0 }
        ])))
        .mount(&wc)
        .await;
    testkit::mount_empty_find(&cms, "categories").await;

    let map = build_category_map(&testkit::wc_client(&wc), &payload)
        .await
        .unwrap();
    assert!(map.is_empty());
}
