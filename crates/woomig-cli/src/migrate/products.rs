//! Product and variation migration.
//!
//! Paginates the legacy product endpoint until an empty page, transforms each
//! record into the Payload product shape, moves its images, and — for
//! variable products — fans out into the variations endpoint. All transforms
//! are pure functions so the field mapping is testable without HTTP.

use std::collections::HashMap;
use std::time::Duration;

use woomig_core::slug::slugify;
use woomig_core::{AppConfig, MigrationReport};
use woomig_payload::{
    AttributeValue, GalleryEntry, ImageTransfer, NewProduct, NewVariation, PayloadClient,
    ProductAttributeInput, SeoInput, StockStatus, TagInput,
};
use woomig_wc::{WcClient, WcProduct, WcVariation};

use crate::progress::Progress;

/// Page cap for one product's variations.
const VARIATION_PAGE_SIZE: u32 = 100;

/// SEO meta descriptions are clipped to the usual SERP snippet length.
const SEO_DESCRIPTION_MAX_CHARS: usize = 160;

/// Result of a product migration pass: one report per entity kind.
pub struct ProductMigration {
    pub products: MigrationReport,
    pub variations: MigrationReport,
}

/// Migrates legacy products (and the variations of variable products) into
/// Payload.
///
/// `limit` caps the number of products processed — the "small test run"
/// switch. `None` walks the whole catalog.
///
/// Idempotent per record via the slug-existence check; per-record failures
/// land in the reports and never abort the run.
///
/// # Errors
///
/// Returns an error only when a page fetch itself fails.
pub async fn migrate_products(
    wc: &WcClient,
    payload: &PayloadClient,
    category_map: &HashMap<i64, String>,
    cfg: &AppConfig,
    limit: Option<usize>,
) -> anyhow::Result<ProductMigration> {
    let mut products_report = MigrationReport::new("products");
    let mut variations_report = MigrationReport::new("variations");
    let mut images = ImageTransfer::new(
        payload,
        cfg.image_download_timeout_secs,
        cfg.image_upload_timeout_secs,
    )?;

    let mut page: u32 = 1;
    let mut processed: usize = 0;

    'pages: loop {
        tracing::info!(page, "fetching product page");
        let products = wc.list_products(page, cfg.product_page_size).await?;
        if products.is_empty() {
            tracing::info!("no more products, pagination complete");
            break;
        }
        tracing::info!(page, count = products.len(), "processing product page");

        let mut progress = Progress::new(products.len(), "products");

        for product in &products {
            if limit.is_some_and(|cap| processed >= cap) {
                tracing::info!(cap = limit, "product limit reached, stopping");
                break 'pages;
            }
            processed += 1;

            migrate_one(
                wc,
                payload,
                category_map,
                cfg,
                &mut images,
                product,
                &mut products_report,
                &mut variations_report,
            )
            .await;

            progress.tick();
            tokio::time::sleep(Duration::from_millis(cfg.product_delay_ms)).await;
        }

        progress.done();
        page += 1;
    }

    tracing::info!("{}", products_report.summary());
    tracing::info!("{}", variations_report.summary());
    Ok(ProductMigration {
        products: products_report,
        variations: variations_report,
    })
}

#[allow(clippy::too_many_arguments)] // Orchestration seam: every migrator input plus both reports.
async fn migrate_one(
    wc: &WcClient,
    payload: &PayloadClient,
    category_map: &HashMap<i64, String>,
    cfg: &AppConfig,
    images: &mut ImageTransfer<'_>,
    product: &WcProduct,
    products_report: &mut MigrationReport,
    variations_report: &mut MigrationReport,
) {
    let slug = product_slug(product);
    tracing::info!(slug = %slug, product_type = %product.r#type, "processing product");

    match payload.find_product_by_slug(&slug).await {
        Ok(Some(_)) => {
            tracing::info!(slug = %slug, "product already exists, skipping");
            products_report.skipped(&slug);
            return;
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(slug = %slug, error = %e, "existence check failed");
            products_report.failed(&slug, e.to_string());
            return;
        }
    }

    let mut new_product = transform_product(product, category_map);

    // First successful transfer becomes the featured image, the rest the
    // gallery. Failed transfers are omitted entirely.
    if !product.images.is_empty() {
        tracing::info!(slug = %slug, count = product.images.len(), "transferring images");
        let mut transferred: Vec<String> = Vec::new();
        for image in &product.images {
            if let Some(id) = images.transfer(&image.src).await {
                transferred.push(id);
            }
        }
        let mut iter = transferred.into_iter();
        new_product.featured_image = iter.next();
        new_product.gallery = iter.map(|image| GalleryEntry { image }).collect();
    }

    let created = match payload.create_product(&new_product).await {
        Ok(doc) => {
            tracing::info!(slug = %slug, id = %doc.id, "created product");
            products_report.created(&slug);
            doc
        }
        Err(e) => {
            tracing::warn!(slug = %slug, error = %e, "failed to create product");
            products_report.failed(&slug, e.to_string());
            return;
        }
    };

    if product.r#type == "variable" {
        migrate_variations(wc, payload, images, product, &created.id, variations_report).await;
    }
}

async fn migrate_variations(
    wc: &WcClient,
    payload: &PayloadClient,
    images: &mut ImageTransfer<'_>,
    product: &WcProduct,
    product_payload_id: &str,
    report: &mut MigrationReport,
) {
    let variations = match wc.list_variations(product.id, VARIATION_PAGE_SIZE).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(product = product.id, error = %e, "failed to fetch variations");
            report.failed(format!("product-{}-variations", product.id), e.to_string());
            return;
        }
    };
    tracing::info!(product = product.id, count = variations.len(), "found variations");

    for variation in &variations {
        let label = format!("variation-{}", variation.id);
        let mut new_variation = transform_variation(variation, product_payload_id);

        if let Some(image) = &variation.image {
            new_variation.image = images.transfer(&image.src).await;
        }

        match payload.create_variation(&new_variation).await {
            Ok(_) => report.created(&label),
            Err(e) => {
                tracing::warn!(variation = variation.id, error = %e, "failed to create variation");
                report.failed(&label, e.to_string());
            }
        }
    }
}

/// The slug the target document will carry: the source slug, or a stable
/// fallback derived from the legacy id.
pub(crate) fn product_slug(product: &WcProduct) -> String {
    if product.slug.is_empty() {
        format!("product-{}", product.id)
    } else {
        product.slug.clone()
    }
}

/// Maps one legacy product onto the Payload product shape. Images are left
/// unset; the migrator fills them in after the transfers resolve.
pub(crate) fn transform_product(
    product: &WcProduct,
    category_map: &HashMap<i64, String>,
) -> NewProduct {
    let name = if product.name.is_empty() {
        "Untitled Product".to_owned()
    } else {
        product.name.clone()
    };

    let categories: Vec<String> = product
        .categories
        .iter()
        .filter_map(|c| category_map.get(&c.id).cloned())
        .collect();

    let attributes: Vec<ProductAttributeInput> = product
        .attributes
        .iter()
        .map(|attr| ProductAttributeInput {
            name: attr.name.clone(),
            slug: slugify(&attr.name),
            visible: attr.visible,
            variation: attr.variation,
            options: attr
                .options
                .iter()
                .map(|o| AttributeValue { value: o.clone() })
                .collect(),
        })
        .collect();

    let tags: Vec<TagInput> = product
        .tags
        .iter()
        .map(|tag| TagInput {
            name: tag.name.clone(),
            slug: tag.slug.clone(),
        })
        .collect();

    let meta_data = if product.meta_data.is_empty() {
        None
    } else {
        Some(
            product
                .meta_data
                .iter()
                .map(|m| (m.key.clone(), m.value.clone()))
                .collect(),
        )
    };

    let seo = SeoInput {
        meta_title: Some(name.clone()),
        meta_description: if product.short_description.is_empty() {
            None
        } else {
            Some(truncate_chars(
                &product.short_description,
                SEO_DESCRIPTION_MAX_CHARS,
            ))
        },
    };

    NewProduct {
        name,
        slug: product_slug(product),
        r#type: if product.r#type.is_empty() {
            "simple".to_owned()
        } else {
            product.r#type.clone()
        },
        description: product.description.clone(),
        short_description: product.short_description.clone(),
        price: parse_price(&product.regular_price).unwrap_or(0.0),
        sale_price: parse_price(&product.sale_price),
        sku: none_if_empty(&product.sku),
        stock_quantity: product.stock_quantity.unwrap_or(0),
        stock_status: map_stock_status(&product.stock_status),
        categories,
        attributes,
        tags,
        meta_data,
        featured_image: None,
        gallery: Vec::new(),
        seo,
    }
}

/// Maps one legacy variation onto the Payload variation shape. The image is
/// left unset; the migrator fills it in after the transfer resolves.
pub(crate) fn transform_variation(variation: &WcVariation, product_id: &str) -> NewVariation {
    let attributes: serde_json::Map<String, serde_json::Value> = variation
        .attributes
        .iter()
        .map(|a| (a.name.clone(), serde_json::Value::String(a.option.clone())))
        .collect();

    NewVariation {
        product: product_id.to_owned(),
        attributes,
        price: parse_price(&variation.regular_price).unwrap_or(0.0),
        sale_price: parse_price(&variation.sale_price),
        sku: none_if_empty(&variation.sku),
        stock_quantity: variation.stock_quantity.unwrap_or(0),
        stock_status: map_stock_status(&variation.stock_status),
        image: None,
    }
}

/// Binary stock mapping: only the exact legacy `"instock"` stays in stock;
/// `"onbackorder"` and anything unrecognised become out of stock.
pub(crate) fn map_stock_status(legacy: &str) -> StockStatus {
    if legacy == "instock" {
        StockStatus::InStock
    } else {
        StockStatus::OutOfStock
    }
}

/// WooCommerce sends prices as decimal strings, empty when unset.
pub(crate) fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn none_if_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

/// Clips to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}


#[cfg(test)]
#[path = "products_test.rs"]
mod migration_tests;
