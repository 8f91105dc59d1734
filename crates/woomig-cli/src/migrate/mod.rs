//! Entity migrators and the fixed-order orchestration over them.

pub(crate) mod attributes;
pub(crate) mod categories;
pub(crate) mod category_map;
pub(crate) mod products;
pub(crate) mod reset;

use woomig_core::AppConfig;
use woomig_payload::PayloadClient;
use woomig_wc::WcClient;

/// Runs the full pipeline in dependency order: categories first (products
/// reference them), then attributes, then products with their variations.
///
/// Post-category and standalone-media migration are not part of the pipeline;
/// the legacy post-category endpoint mapping was never resolved upstream.
///
/// # Errors
///
/// Propagates the first whole-step failure; per-record failures stay inside
/// each step's report.
pub(crate) async fn run_all(
    wc: &WcClient,
    payload: &PayloadClient,
    cfg: &AppConfig,
) -> anyhow::Result<()> {
    tracing::info!("step 1/3: categories");
    let categories = categories::migrate_categories(wc, payload, cfg).await?;

    tracing::info!("step 2/3: attributes");
    let attrs = attributes::migrate_attributes(wc, payload, cfg).await?;

    tracing::info!("step 3/3: products and variations");
    let products = products::migrate_products(wc, payload, &categories.map, cfg, None).await?;

    tracing::info!("post categories: skipped (not migrated)");

    tracing::info!("migration finished");
    tracing::info!("{}", categories.report.summary());
    tracing::info!("{}", attrs.report.summary());
    tracing::info!("{}", products.products.summary());
    tracing::info!("{}", products.variations.summary());

    for report in [
        &categories.report,
        &attrs.report,
        &products.products,
        &products.variations,
    ] {
        for (label, reason) in report.failures() {
            tracing::warn!(entity = %report.entity, label, reason, "record failed");
        }
    }

    Ok(())
}
