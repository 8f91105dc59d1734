//! HTTP client for the WooCommerce REST API.
//!
//! Wraps `reqwest` with WooCommerce-specific URL building (the `wp-json/wc/v3`
//! prefix, query-string consumer-key credentials) and typed response
//! deserialization. All access is read-only.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::WcError;
use crate::types::{WcAttribute, WcAttributeTerm, WcCategory, WcProduct, WcVariation};

/// Client for the legacy WooCommerce REST API (v3).
///
/// Bound to one site URL and one consumer key/secret pair. Credentials are
/// sent as query parameters, which WooCommerce accepts over HTTPS. Use
/// [`WcClient::new`] with a wiremock URI to point at a mock server in tests.
pub struct WcClient {
    client: Client,
    base_url: Url,
    consumer_key: String,
    consumer_secret: String,
}

impl WcClient {
    /// Creates a client rooted at `{site_url}/wp-json/wc/v3/`.
    ///
    /// # Errors
    ///
    /// Returns [`WcError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`WcError::InvalidSiteUrl`] if `site_url` does not
    /// parse.
    pub fn new(
        site_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, WcError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("woomig/0.1 (catalog-migration)")
            .build()?;

        // Normalise: exactly one trailing slash so `Url::join` appends path
        // segments instead of replacing the last one.
        let normalised = format!("{}/wp-json/wc/v3/", site_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WcError::InvalidSiteUrl {
            url: site_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            consumer_key: consumer_key.to_owned(),
            consumer_secret: consumer_secret.to_owned(),
        })
    }

    /// Fetches product categories (`products/categories`), one page.
    ///
    /// # Errors
    ///
    /// Returns [`WcError`] on network failure, non-2xx status, or a response
    /// that does not deserialize.
    pub async fn list_categories(&self, per_page: u32) -> Result<Vec<WcCategory>, WcError> {
        let url = self.build_url(
            "products/categories",
            &[("per_page", &per_page.to_string())],
        )?;
        self.get_json(url).await
    }

    /// Fetches all global product attributes (`products/attributes`).
    ///
    /// # Errors
    ///
    /// Returns [`WcError`] on network failure, non-2xx status, or a response
    /// that does not deserialize.
    pub async fn list_attributes(&self) -> Result<Vec<WcAttribute>, WcError> {
        let url = self.build_url("products/attributes", &[])?;
        self.get_json(url).await
    }

    /// Fetches the terms of one attribute
    /// (`products/attributes/{id}/terms`), one page.
    ///
    /// # Errors
    ///
    /// Returns [`WcError`] on network failure, non-2xx status, or a response
    /// that does not deserialize.
    pub async fn list_attribute_terms(
        &self,
        attribute_id: i64,
        per_page: u32,
    ) -> Result<Vec<WcAttributeTerm>, WcError> {
        let url = self.build_url(
            &format!("products/attributes/{attribute_id}/terms"),
            &[("per_page", &per_page.to_string())],
        )?;
        self.get_json(url).await
    }

    /// Fetches one page of products (`products`). An empty vec means the page
    /// is past the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`WcError`] on network failure, non-2xx status, or a response
    /// that does not deserialize.
    pub async fn list_products(&self, page: u32, per_page: u32) -> Result<Vec<WcProduct>, WcError> {
        let url = self.build_url(
            "products",
            &[
                ("per_page", &per_page.to_string()),
                ("page", &page.to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    /// Fetches the variations of one product
    /// (`products/{id}/variations`), one page.
    ///
    /// # Errors
    ///
    /// Returns [`WcError`] on network failure, non-2xx status, or a response
    /// that does not deserialize.
    pub async fn list_variations(
        &self,
        product_id: i64,
        per_page: u32,
    ) -> Result<Vec<WcVariation>, WcError> {
        let url = self.build_url(
            &format!("products/{product_id}/variations"),
            &[("per_page", &per_page.to_string())],
        )?;
        self.get_json(url).await
    }

    /// Builds the full request URL: joins `path` onto the `wc/v3` base and
    /// appends the consumer credentials plus `extra` as percent-encoded query
    /// pairs.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, WcError> {
        let mut url = self.base_url.join(path).map_err(|e| WcError::InvalidSiteUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("consumer_key", &self.consumer_key);
            pairs.append_pair("consumer_secret", &self.consumer_secret);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and deserializes the body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WcError> {
        let context = redact_credentials(&url);
        tracing::debug!(url = %context, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WcError::UnexpectedStatus {
                status: status.as_u16(),
                url: context,
                body,
            });
        }

        let body = response.text().await?;
        tracing::debug!(url = %context, bytes = body.len(), "response received");
        serde_json::from_str(&body).map_err(|e| WcError::Deserialize {
            context,
            source: e,
        })
    }
}

/// Strips the consumer key/secret query values before a URL lands in an error
/// message or a log line.
fn redact_credentials(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "consumer_key" || k == "consumer_secret" {
                (k.into_owned(), "[redacted]".to_owned())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
