use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let wp_site_url = require("WP_SITE_URL")?;
    let wc_consumer_key = require("WC_CONSUMER_KEY")?;
    let wc_consumer_secret = require("WC_CONSUMER_SECRET")?;
    let payload_url = require("PAYLOAD_URL")?;
    let payload_email = require("PAYLOAD_EMAIL")?;
    let payload_password = require("PAYLOAD_PASSWORD")?;

    let log_level = or_default("WOOMIG_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("WOOMIG_REQUEST_TIMEOUT_SECS", "30")?;
    let product_page_size = parse_u32("WOOMIG_PRODUCT_PAGE_SIZE", "20")?;
    let category_delay_ms = parse_u64("WOOMIG_CATEGORY_DELAY_MS", "100")?;
    let attribute_delay_ms = parse_u64("WOOMIG_ATTRIBUTE_DELAY_MS", "300")?;
    let product_delay_ms = parse_u64("WOOMIG_PRODUCT_DELAY_MS", "500")?;
    let image_download_timeout_secs = parse_u64("WOOMIG_IMAGE_DOWNLOAD_TIMEOUT_SECS", "30")?;
    let image_upload_timeout_secs = parse_u64("WOOMIG_IMAGE_UPLOAD_TIMEOUT_SECS", "60")?;

    Ok(AppConfig {
        wp_site_url,
        wc_consumer_key,
        wc_consumer_secret,
        payload_url,
        payload_email,
        payload_password,
        log_level,
        request_timeout_secs,
        product_page_size,
        category_delay_ms,
        attribute_delay_ms,
        product_delay_ms,
        image_download_timeout_secs,
        image_upload_timeout_secs,
    })
}
