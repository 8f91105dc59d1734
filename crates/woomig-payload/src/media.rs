//! Download-and-reupload image transfer with two layers of deduplication.
//!
//! Cross-run dedup keys on the original filename: a media document with the
//! same filename already in Payload is reused without downloading. Within a
//! run, downloaded bytes are additionally keyed by SHA-256 so the same image
//! served under two different basenames is uploaded once.
//!
//! Every failure on this path is soft: the error is logged and the transfer
//! resolves to `None`, which callers treat as "image omitted". A broken image
//! must never sink the product it belongs to.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::client::PayloadClient;
use crate::error::PayloadError;

/// Sequential image mover bound to one Payload session.
pub struct ImageTransfer<'a> {
    payload: &'a PayloadClient,
    download: Client,
    upload_timeout_secs: u64,
    /// SHA-256 hex digest → media id, for images already moved this run.
    uploaded_by_hash: HashMap<String, String>,
}

impl<'a> ImageTransfer<'a> {
    /// Creates a transfer bound to `payload`, with a dedicated download client
    /// so legacy-site timeouts can differ from CMS timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Http`] if the download client cannot be built.
    pub fn new(
        payload: &'a PayloadClient,
        download_timeout_secs: u64,
        upload_timeout_secs: u64,
    ) -> Result<Self, PayloadError> {
        let download = Client::builder()
            .timeout(Duration::from_secs(download_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("woomig/0.1 (catalog-migration)")
            .build()?;
        Ok(Self {
            payload,
            download,
            upload_timeout_secs,
            uploaded_by_hash: HashMap::new(),
        })
    }

    /// Moves one remote image into the Payload media collection and returns
    /// its media id, or `None` if anything along the way failed.
    pub async fn transfer(&mut self, image_url: &str) -> Option<String> {
        match self.try_transfer(image_url).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(url = image_url, error = %e, "image transfer failed; omitting image");
                None
            }
        }
    }

    async fn try_transfer(&mut self, image_url: &str) -> Result<String, PayloadError> {
        let filename = original_filename(image_url)?;

        // Filename hit in the target: reuse without downloading.
        if let Some(existing) = self.payload.find_media_by_filename(&filename).await? {
            tracing::debug!(filename, id = %existing.id, "media already uploaded; reusing");
            return Ok(existing.id);
        }

        tracing::debug!(filename, url = image_url, "downloading image");
        let bytes = self.download_bytes(image_url).await?;

        let digest = hex_digest(&bytes);
        if let Some(id) = self.uploaded_by_hash.get(&digest) {
            tracing::debug!(filename, id, "identical bytes already uploaded this run; reusing");
            return Ok(id.clone());
        }

        let alt = strip_extension(&filename);
        tracing::debug!(filename, size = bytes.len(), "uploading image to Payload");
        let doc = self
            .payload
            .upload_media(&filename, bytes, &alt, self.upload_timeout_secs)
            .await?;

        self.uploaded_by_hash.insert(digest, doc.id.clone());
        Ok(doc.id)
    }

    async fn download_bytes(&self, image_url: &str) -> Result<Vec<u8>, PayloadError> {
        let response = self.download.get(image_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PayloadError::Api {
                status: status.as_u16(),
                context: format!("GET {image_url}"),
                message: "image download returned non-2xx".to_owned(),
                issues: Vec::new(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Basename of the URL path, e.g.
/// `https://site/wp-content/uploads/2024/01/shoe.jpg` → `shoe.jpg`.
fn original_filename(image_url: &str) -> Result<String, PayloadError> {
    let url = reqwest::Url::parse(image_url).map_err(|e| PayloadError::InvalidImageUrl {
        url: image_url.to_owned(),
        reason: e.to_string(),
    })?;
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PayloadError::InvalidImageUrl {
            url: image_url.to_owned(),
            reason: "URL path has no filename component".to_owned(),
        })?;
    Ok(name.to_owned())
}

/// Filename minus its last extension, used as the alt text.
fn strip_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => filename.to_owned(),
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}
