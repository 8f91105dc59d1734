//! Destructive reset utilities: wipe the migrated catalog (or just the media
//! library) from the target so a migration can be rerun from scratch.
//!
//! Deletion order matters: variations reference products and products
//! reference media, so each collection is purged before its dependencies.

use woomig_payload::PayloadClient;

/// Fetch cap for one purge pass; matches the largest expected catalog.
const PURGE_FETCH_LIMIT: u32 = 1000;

/// Per-collection deletion tally.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PurgeStats {
    pub deleted: usize,
    pub failed: usize,
}

/// Outcome of a full catalog reset.
pub(crate) struct ResetOutcome {
    pub variations: PurgeStats,
    pub products: PurgeStats,
    pub media: PurgeStats,
}

/// Deletes every variation, product, and media document, in that order.
///
/// Individual delete failures are logged and counted but never stop the
/// purge.
///
/// # Errors
///
/// Returns an error only when listing a collection fails.
pub(crate) async fn reset_catalog(payload: &PayloadClient) -> anyhow::Result<ResetOutcome> {
    tracing::info!("purging product variations");
    let variations = purge_variations(payload).await?;

    tracing::info!("purging products");
    let products = purge_products(payload).await?;

    tracing::info!("purging media");
    let media = purge_media(payload).await?;

    tracing::info!(
        variations = variations.deleted,
        products = products.deleted,
        media = media.deleted,
        "catalog reset complete"
    );
    Ok(ResetOutcome {
        variations,
        products,
        media,
    })
}

/// Deletes every media document, leaving products and variations alone.
///
/// # Errors
///
/// Returns an error only when listing the media collection fails.
pub(crate) async fn delete_all_media(payload: &PayloadClient) -> anyhow::Result<PurgeStats> {
    let stats = purge_media(payload).await?;
    tracing::info!(deleted = stats.deleted, failed = stats.failed, "media purge complete");
    Ok(stats)
}

async fn purge_variations(payload: &PayloadClient) -> anyhow::Result<PurgeStats> {
    let docs = payload.list_variations(PURGE_FETCH_LIMIT).await?;
    let mut stats = PurgeStats::default();
    for doc in docs {
        match payload.delete_variation(&doc.id).await {
            Ok(()) => stats.deleted += 1,
            Err(e) => {
                tracing::warn!(id = %doc.id, error = %e, "failed to delete variation");
                stats.failed += 1;
            }
        }
    }
    Ok(stats)
}

async fn purge_products(payload: &PayloadClient) -> anyhow::Result<PurgeStats> {
    let docs = payload.list_products(PURGE_FETCH_LIMIT).await?;
    let mut stats = PurgeStats::default();
    for doc in docs {
        match payload.delete_product(&doc.id).await {
            Ok(()) => stats.deleted += 1,
            Err(e) => {
                tracing::warn!(id = %doc.id, slug = %doc.slug, error = %e, "failed to delete product");
                stats.failed += 1;
            }
        }
    }
    Ok(stats)
}

async fn purge_media(payload: &PayloadClient) -> anyhow::Result<PurgeStats> {
    let docs = payload.list_media(PURGE_FETCH_LIMIT).await?;
    let mut stats = PurgeStats::default();
    for doc in docs {
        match payload.delete_media(&doc.id).await {
            Ok(()) => stats.deleted += 1,
            Err(e) => {
                tracing::warn!(id = %doc.id, filename = %doc.filename, error = %e, "failed to delete media");
                stats.failed += 1;
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "reset_test.rs"]
mod tests;
