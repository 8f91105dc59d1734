//! `woomig` — migrates a WooCommerce catalog into Payload CMS.

mod migrate;
mod progress;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use woomig_payload::PayloadClient;
use woomig_wc::WcClient;

#[derive(Debug, Parser)]
#[command(name = "woomig")]
#[command(about = "WooCommerce → Payload CMS catalog migration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Migrate product categories (parents before children).
    Categories,
    /// Migrate product attributes with their terms.
    Attributes,
    /// Migrate products and the variations of variable products.
    Products {
        /// Stop after this many products; useful for a trial run.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the full pipeline: categories, attributes, then products.
    All,
    /// Print the legacy-id → Payload-id category mapping without migrating.
    CategoryMap,
    /// Delete every migrated variation, product, and media document.
    Reset,
    /// Delete every media document, leaving products in place.
    DeleteMedia,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let cfg = woomig_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cfg.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let wc = WcClient::new(
        &cfg.wp_site_url,
        &cfg.wc_consumer_key,
        &cfg.wc_consumer_secret,
        cfg.request_timeout_secs,
    )?;
    let payload = PayloadClient::connect(
        &cfg.payload_url,
        &cfg.payload_email,
        &cfg.payload_password,
        cfg.request_timeout_secs,
    )
    .await?;

    match cli.command {
        Commands::Categories => {
            let result = migrate::categories::migrate_categories(&wc, &payload, &cfg).await?;
            println!("{}", result.report.summary());
        }
        Commands::Attributes => {
            let result = migrate::attributes::migrate_attributes(&wc, &payload, &cfg).await?;
            println!("{}", result.report.summary());
        }
        Commands::Products { limit } => {
            let map = migrate::category_map::build_category_map(&wc, &payload).await?;
            let result =
                migrate::products::migrate_products(&wc, &payload, &map, &cfg, limit).await?;
            println!("{}", result.products.summary());
            println!("{}", result.variations.summary());
        }
        Commands::All => {
            migrate::run_all(&wc, &payload, &cfg).await?;
        }
        Commands::CategoryMap => {
            let map = migrate::category_map::build_category_map(&wc, &payload).await?;
            println!("{} categories mapped", map.len());
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by_key(|(id, _)| **id);
            for (legacy_id, payload_id) in entries {
                println!("  {legacy_id} -> {payload_id}");
            }
        }
        Commands::Reset => {
            let outcome = migrate::reset::reset_catalog(&payload).await?;
            println!(
                "deleted {} variations, {} products, {} media documents",
                outcome.variations.deleted, outcome.products.deleted, outcome.media.deleted
            );
            let failed =
                outcome.variations.failed + outcome.products.failed + outcome.media.failed;
            if failed > 0 {
                println!("{failed} deletions failed; see the log");
            }
        }
        Commands::DeleteMedia => {
            let stats = migrate::reset::delete_all_media(&payload).await?;
            println!("deleted {} media documents ({} failed)", stats.deleted, stats.failed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn products_accepts_a_limit() {
        let cli = Cli::try_parse_from(["woomig", "products", "--limit", "5"]).unwrap();
        match cli.command {
            Commands::Products { limit } => assert_eq!(limit, Some(5)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn products_limit_defaults_to_none() {
        let cli = Cli::try_parse_from(["woomig", "products"]).unwrap();
        match cli.command {
            Commands::Products { limit } => assert_eq!(limit, None),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["woomig"]).is_err());
    }

    #[test]
    fn reset_and_delete_media_parse() {
        assert!(matches!(
            Cli::try_parse_from(["woomig", "reset"]).unwrap().command,
            Commands::Reset
        ));
        assert!(matches!(
            Cli::try_parse_from(["woomig", "delete-media"]).unwrap().command,
            Commands::DeleteMedia
        ));
    }
}
