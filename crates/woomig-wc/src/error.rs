use thiserror::Error;

/// Errors returned by the WooCommerce API client.
#[derive(Debug, Error)]
pub enum WcError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status; `body` carries the remote error
    /// payload when one was readable.
    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured site URL does not parse as a URL base.
    #[error("invalid site URL \"{url}\": {reason}")]
    InvalidSiteUrl { url: String, reason: String },
}
