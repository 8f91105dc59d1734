//! HTTP client for the Payload CMS REST API.
//!
//! [`PayloadClient::connect`] performs the login call once and owns the bearer
//! token for the rest of the session; every other method attaches it. There is
//! no shared global token state — callers that need authenticated access hold
//! a reference to the session.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PayloadError;
use crate::types::{
    AttributeDoc, CategoryDoc, DocEnvelope, FindResponse, LoginResponse, MediaDoc, NewAttribute,
    NewCategory, NewProduct, NewVariation, ProductDoc, VariationDoc,
};

const CATEGORIES: &str = "categories";
const PRODUCTS: &str = "products";
const PRODUCT_ATTRIBUTES: &str = "product-attributes";
const PRODUCT_VARIATIONS: &str = "product-variations";
const MEDIA: &str = "media";

/// Authenticated session against one Payload instance.
#[derive(Debug)]
pub struct PayloadClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl PayloadClient {
    /// Logs in with email/password and returns a session holding the bearer
    /// token. The token is fetched exactly once; Payload tokens outlive any
    /// realistic migration run.
    ///
    /// # Errors
    ///
    /// - [`PayloadError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`PayloadError::Auth`] if the credentials are rejected.
    /// - [`PayloadError::Http`] / [`PayloadError::Deserialize`] on transport
    ///   or body-shape failures.
    pub async fn connect(
        base_url: &str,
        email: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Result<Self, PayloadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("woomig/0.1 (catalog-migration)")
            .build()?;

        let normalised = format!("{}/api/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PayloadError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        tracing::info!(url = %base_url, "logging in to Payload");

        let login_url = base_url
            .join("users/login")
            .map_err(|e| PayloadError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        let response = client
            .post(login_url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PayloadError::Auth {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| PayloadError::Deserialize {
                context: "users/login".to_owned(),
                source: e,
            })?;

        tracing::info!("Payload login succeeded");

        Ok(Self {
            client,
            base_url,
            token: login.token,
        })
    }

    /// Finds a category by exact slug.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn find_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<CategoryDoc>, PayloadError> {
        self.find_one(CATEGORIES, "slug", slug).await
    }

    /// Lists categories of the given `type` (e.g. `"product"`), up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn list_categories_of_type(
        &self,
        r#type: &str,
        limit: u32,
    ) -> Result<Vec<CategoryDoc>, PayloadError> {
        let response: FindResponse<CategoryDoc> = self
            .find(CATEGORIES, &[("where[type][equals]", r#type)], Some(limit))
            .await?;
        Ok(response.docs)
    }

    /// Creates a category document.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Api`] with validation issues on a rejected
    /// create.
    pub async fn create_category(&self, category: &NewCategory) -> Result<CategoryDoc, PayloadError> {
        self.create(CATEGORIES, category).await
    }

    /// Finds a product by exact slug.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn find_product_by_slug(&self, slug: &str) -> Result<Option<ProductDoc>, PayloadError> {
        self.find_one(PRODUCTS, "slug", slug).await
    }

    /// Creates a product document.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Api`] with validation issues on a rejected
    /// create.
    pub async fn create_product(&self, product: &NewProduct) -> Result<ProductDoc, PayloadError> {
        self.create(PRODUCTS, product).await
    }

    /// Creates a product-variation document referencing an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Api`] with validation issues on a rejected
    /// create.
    pub async fn create_variation(
        &self,
        variation: &NewVariation,
    ) -> Result<VariationDoc, PayloadError> {
        self.create(PRODUCT_VARIATIONS, variation).await
    }

    /// Finds a product attribute by exact slug.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn find_attribute_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<AttributeDoc>, PayloadError> {
        self.find_one(PRODUCT_ATTRIBUTES, "slug", slug).await
    }

    /// Creates a product-attribute document.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Api`] with validation issues on a rejected
    /// create.
    pub async fn create_attribute(
        &self,
        attribute: &NewAttribute,
    ) -> Result<AttributeDoc, PayloadError> {
        self.create(PRODUCT_ATTRIBUTES, attribute).await
    }

    /// Finds an uploaded media document by exact filename.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn find_media_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<MediaDoc>, PayloadError> {
        self.find_one(MEDIA, "filename", filename).await
    }

    /// Lists products for the reset utilities, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn list_products(&self, limit: u32) -> Result<Vec<ProductDoc>, PayloadError> {
        let response: FindResponse<ProductDoc> = self.find(PRODUCTS, &[], Some(limit)).await?;
        Ok(response.docs)
    }

    /// Lists product variations for the reset utilities, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn list_variations(&self, limit: u32) -> Result<Vec<VariationDoc>, PayloadError> {
        let response: FindResponse<VariationDoc> =
            self.find(PRODUCT_VARIATIONS, &[], Some(limit)).await?;
        Ok(response.docs)
    }

    /// Lists media documents for the reset utilities, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn list_media(&self, limit: u32) -> Result<Vec<MediaDoc>, PayloadError> {
        let response: FindResponse<MediaDoc> = self.find(MEDIA, &[], Some(limit)).await?;
        Ok(response.docs)
    }

    /// Deletes one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport or API failures.
    pub async fn delete_product(&self, id: &str) -> Result<(), PayloadError> {
        self.delete(PRODUCTS, id).await
    }

    /// Deletes one product variation by id.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport or API failures.
    pub async fn delete_variation(&self, id: &str) -> Result<(), PayloadError> {
        self.delete(PRODUCT_VARIATIONS, id).await
    }

    /// Deletes one media document by id.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport or API failures.
    pub async fn delete_media(&self, id: &str) -> Result<(), PayloadError> {
        self.delete(MEDIA, id).await
    }

    /// Uploads a file to the media collection as multipart form data
    /// (`file` + `alt`), with a per-request timeout suited to large images.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on transport, API, or body-shape failures.
    pub async fn upload_media(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        alt: &str,
        timeout_secs: u64,
    ) -> Result<MediaDoc, PayloadError> {
        let url = self.collection_url(MEDIA, &[])?;
        let context = format!("POST {MEDIA} (upload {filename})");

        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_owned());
        if let Some(mime) = mime_for_filename(filename) {
            part = part.mime_str(mime)?;
        }
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("alt", alt.to_owned());

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .multipart(form)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await?;

        let body = Self::check_response(response, &context).await?;
        let envelope: DocEnvelope<MediaDoc> =
            serde_json::from_str(&body).map_err(|e| PayloadError::Deserialize {
                context,
                source: e,
            })?;
        Ok(envelope.doc)
    }

    /// Runs a find with an exact-match filter on one field and returns the
    /// first document, if any.
    async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<T>, PayloadError> {
        let filter = format!("where[{field}][equals]");
        let response: FindResponse<T> = self
            .find(collection, &[(filter.as_str(), value)], None)
            .await?;
        Ok(response.docs.into_iter().next())
    }

    async fn find<T: DeserializeOwned>(
        &self,
        collection: &str,
        params: &[(&str, &str)],
        limit: Option<u32>,
    ) -> Result<FindResponse<T>, PayloadError> {
        let limit_str;
        let mut query: Vec<(&str, &str)> = params.to_vec();
        if let Some(l) = limit {
            limit_str = l.to_string();
            query.push(("limit", &limit_str));
        }

        let url = self.collection_url(collection, &query)?;
        let context = format!("GET {collection}");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let body = Self::check_response(response, &context).await?;
        serde_json::from_str(&body).map_err(|e| PayloadError::Deserialize {
            context,
            source: e,
        })
    }

    async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, PayloadError> {
        let url = self.collection_url(collection, &[])?;
        let context = format!("POST {collection}");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        let text = Self::check_response(response, &context).await?;
        let envelope: DocEnvelope<T> =
            serde_json::from_str(&text).map_err(|e| PayloadError::Deserialize {
                context,
                source: e,
            })?;
        Ok(envelope.doc)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), PayloadError> {
        let url = self.collection_url(&format!("{collection}/{id}"), &[])?;
        let context = format!("DELETE {collection}/{id}");

        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check_response(response, &context).await?;
        Ok(())
    }

    fn collection_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PayloadError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PayloadError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Asserts a 2xx status and returns the body text. Non-2xx bodies are
    /// parsed for Payload's `errors` array so validation detail survives into
    /// the error.
    async fn check_response(
        response: reqwest::Response,
        context: &str,
    ) -> Result<String, PayloadError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let (message, issues) = parse_error_body(&body);
        Err(PayloadError::Api {
            status: status.as_u16(),
            context: context.to_owned(),
            message,
            issues,
        })
    }
}

/// Extracts a top-level message and the per-field validation messages from a
/// Payload error body. Falls back to the raw body when the shape is foreign.
fn parse_error_body(body: &str) -> (String, Vec<String>) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return (body.to_owned(), Vec::new());
    };

    let issues: Vec<String> = value
        .get("errors")
        .and_then(serde_json::Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(serde_json::Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let message = issues
        .first()
        .cloned()
        .unwrap_or_else(|| body.to_owned());

    (message, issues)
}

/// Content types for the common web-image extensions. The upload still goes
/// through without one; Payload then sniffs the file itself.
fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}
