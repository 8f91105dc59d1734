//! Slug-keyed correlation between legacy category ids and Payload category
//! ids, for runs where categories were already migrated in a prior step.

use std::collections::HashMap;

use woomig_payload::PayloadClient;
use woomig_wc::WcClient;

use super::categories::CATEGORY_PAGE_SIZE;

/// Payload-side fetch cap; one page covers every category the store has.
const TARGET_FETCH_LIMIT: u32 = 1000;

/// Builds the legacy-id → Payload-id category map by slug equality.
///
/// Legacy categories with no slug match on the Payload side are simply absent
/// from the map; the product migrator then drops those references. Nothing is
/// created here.
///
/// # Errors
///
/// Returns an error if either side's fetch fails.
pub async fn build_category_map(
    wc: &WcClient,
    payload: &PayloadClient,
) -> anyhow::Result<HashMap<i64, String>> {
    tracing::info!("building category mapping");

    let wc_categories = wc.list_categories(CATEGORY_PAGE_SIZE).await?;
    let payload_categories = payload
        .list_categories_of_type("product", TARGET_FETCH_LIMIT)
        .await?;

    let by_slug: HashMap<&str, &str> = payload_categories
        .iter()
        .map(|c| (c.slug.as_str(), c.id.as_str()))
        .collect();

    let mut map = HashMap::new();
    for category in &wc_categories {
        if let Some(id) = by_slug.get(category.slug.as_str()) {
            map.insert(category.id, (*id).to_owned());
        }
    }

    tracing::info!(mapped = map.len(), total = wc_categories.len(), "mapped categories");
    Ok(map)
}

#[cfg(test)]
#[path = "category_map_test.rs"]
mod tests;
