//! Product-attribute migration. Runs before products so that attribute
//! documents exist when product sub-records mention them.

use std::collections::HashMap;
use std::time::Duration;

use woomig_core::{AppConfig, MigrationReport};
use woomig_payload::{AttributeOption, NewAttribute, PayloadClient};
use woomig_wc::{WcAttribute, WcClient};

use crate::progress::Progress;

/// Page cap for one attribute's terms.
const TERM_PAGE_SIZE: u32 = 100;

/// Result of an attribute migration pass.
pub struct AttributeMigration {
    pub map: HashMap<i64, String>,
    pub report: MigrationReport,
}

/// Migrates WooCommerce global attributes (and their terms, flattened to
/// select options) into the Payload `product-attributes` collection.
///
/// Idempotent per record: an attribute whose slug already exists is mapped
/// and skipped, and its terms are not re-fetched.
///
/// # Errors
///
/// Returns an error for whole-run failures (the initial attribute fetch).
pub async fn migrate_attributes(
    wc: &WcClient,
    payload: &PayloadClient,
    cfg: &AppConfig,
) -> anyhow::Result<AttributeMigration> {
    tracing::info!("fetching product attributes from WooCommerce");
    let attributes = wc.list_attributes().await?;
    tracing::info!(count = attributes.len(), "found product attributes");

    let mut map: HashMap<i64, String> = HashMap::new();
    let mut report = MigrationReport::new("attributes");

    if attributes.is_empty() {
        tracing::info!("no attributes found, skipping");
        return Ok(AttributeMigration { map, report });
    }

    let mut progress = Progress::new(attributes.len(), "attributes");

    for attribute in &attributes {
        match migrate_one(wc, payload, attribute).await {
            Ok(Outcome::Existing(id)) => {
                tracing::info!(slug = %attribute.slug, "attribute already exists, skipping");
                map.insert(attribute.id, id);
                report.skipped(&attribute.slug);
            }
            Ok(Outcome::Created { id, terms }) => {
                tracing::info!(slug = %attribute.slug, terms, "created attribute");
                map.insert(attribute.id, id);
                report.created(&attribute.slug);
                tokio::time::sleep(Duration::from_millis(cfg.attribute_delay_ms)).await;
            }
            Err(e) => {
                tracing::warn!(slug = %attribute.slug, error = %e, "failed to migrate attribute");
                report.failed(&attribute.slug, e.to_string());
            }
        }
        progress.tick();
    }

    progress.done();
    tracing::info!("{}", report.summary());
    Ok(AttributeMigration { map, report })
}

enum Outcome {
    Existing(String),
    Created { id: String, terms: usize },
}

async fn migrate_one(
    wc: &WcClient,
    payload: &PayloadClient,
    attribute: &WcAttribute,
) -> anyhow::Result<Outcome> {
    if let Some(existing) = payload.find_attribute_by_slug(&attribute.slug).await? {
        return Ok(Outcome::Existing(existing.id));
    }

    let terms = wc.list_attribute_terms(attribute.id, TERM_PAGE_SIZE).await?;

    let created = payload
        .create_attribute(&NewAttribute {
            name: attribute.name.clone(),
            slug: attribute.slug.clone(),
            // The legacy store only distinguishes display widgets client-side;
            // everything arrives as a select.
            r#type: "select".to_owned(),
            options: terms
                .iter()
                .map(|term| AttributeOption {
                    label: term.name.clone(),
                    value: term.name.clone(),
                })
                .collect(),
        })
        .await?;

    Ok(Outcome::Created {
        id: created.id,
        terms: terms.len(),
    })
}

#[cfg(test)]
#[path = "attributes_test.rs"]
mod tests;
