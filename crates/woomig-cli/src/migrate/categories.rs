//! Product-category migration.
//!
//! Categories form a tree via the legacy `parent` id, and a child can only be
//! linked to its parent in Payload if the parent's document already exists.
//! The source order gives no such guarantee, so the batch is reordered with a
//! breadth-first traversal of the parent graph before anything is created.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use woomig_core::{AppConfig, MigrationReport};
use woomig_payload::{NewCategory, PayloadClient};
use woomig_wc::{WcCategory, WcClient};

use crate::progress::Progress;

/// How many legacy categories one page fetch covers; stores in scope fit in
/// a single page.
pub(crate) const CATEGORY_PAGE_SIZE: u32 = 100;

/// Result of a category migration pass: the legacy-id → Payload-id map that
/// the product migrator consumes, plus the per-record outcomes.
pub struct CategoryMigration {
    pub map: HashMap<i64, String>,
    pub report: MigrationReport,
}

/// Migrates all WooCommerce product categories into the Payload `categories`
/// collection.
///
/// Re-running is safe: a category whose slug already exists in Payload is
/// recorded into the map and skipped. Per-record failures are collected in
/// the report and do not abort the batch.
///
/// # Errors
///
/// Returns an error only for whole-run failures: the initial WooCommerce
/// fetch, or anything `anyhow` bubbles from it.
pub async fn migrate_categories(
    wc: &WcClient,
    payload: &PayloadClient,
    cfg: &AppConfig,
) -> anyhow::Result<CategoryMigration> {
    tracing::info!("fetching product categories from WooCommerce");
    let categories = wc.list_categories(CATEGORY_PAGE_SIZE).await?;
    tracing::info!(count = categories.len(), "found product categories");

    let ordered = order_parents_first(categories);

    let mut map: HashMap<i64, String> = HashMap::new();
    let mut report = MigrationReport::new("categories");
    let mut progress = Progress::new(ordered.len(), "categories");

    for category in &ordered {
        match migrate_one(payload, category, &map).await {
            Ok(Outcome::Existing(id)) => {
                tracing::info!(slug = %category.slug, "category already exists, skipping");
                map.insert(category.id, id);
                report.skipped(&category.slug);
            }
            Ok(Outcome::Created(id)) => {
                map.insert(category.id, id);
                report.created(&category.slug);
                tokio::time::sleep(Duration::from_millis(cfg.category_delay_ms)).await;
            }
            Err(e) => {
                tracing::warn!(slug = %category.slug, error = %e, "failed to migrate category");
                report.failed(&category.slug, e.to_string());
            }
        }
        progress.tick();
    }

    progress.done();
    tracing::info!("{}", report.summary());
    Ok(CategoryMigration { map, report })
}

enum Outcome {
    Existing(String),
    Created(String),
}

async fn migrate_one(
    payload: &PayloadClient,
    category: &WcCategory,
    map: &HashMap<i64, String>,
) -> Result<Outcome, woomig_payload::PayloadError> {
    if let Some(existing) = payload.find_category_by_slug(&category.slug).await? {
        return Ok(Outcome::Existing(existing.id));
    }

    let parent = if category.parent == 0 {
        None
    } else {
        // BFS ordering guarantees the parent was processed first; a miss here
        // means the parent itself failed, and the child is created unparented
        // rather than dropped.
        map.get(&category.parent).cloned()
    };

    let created = payload
        .create_category(&NewCategory {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            r#type: "product".to_owned(),
            parent,
        })
        .await?;
    Ok(Outcome::Created(created.id))
}

/// Reorders categories so every parent precedes all of its descendants,
/// whatever the source order.
///
/// Roots are categories with `parent == 0` or a parent id missing from the
/// fetched set (orphans). Traversal is breadth-first from the roots,
/// preserving input order within each level; nodes unreachable from any root
/// (a parent cycle in corrupt source data) are appended in input order so no
/// record is silently dropped.
pub(crate) fn order_parents_first(categories: Vec<WcCategory>) -> Vec<WcCategory> {
    let ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();

    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    for (idx, category) in categories.iter().enumerate() {
        if category.parent == 0 || !ids.contains(&category.parent) {
            queue.push_back(idx);
        } else {
            children.entry(category.parent).or_default().push(idx);
        }
    }

    let mut order: Vec<usize> = Vec::with_capacity(categories.len());
    let mut visited: HashSet<usize> = HashSet::new();

    while let Some(idx) = queue.pop_front() {
        if !visited.insert(idx) {
            continue;
        }
        order.push(idx);
        if let Some(kids) = children.get(&categories[idx].id) {
            for &kid in kids {
                queue.push_back(kid);
            }
        }
    }

    // Cycle leftovers.
    for idx in 0..categories.len() {
        if !visited.contains(&idx) {
            order.push(idx);
        }
    }

    let mut by_index: Vec<Option<WcCategory>> = categories.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| by_index[idx].take())
        .collect()
}


#[cfg(test)]
#[path = "categories_test.rs"]
mod migration_tests;
