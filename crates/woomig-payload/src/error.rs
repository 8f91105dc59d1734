use thiserror::Error;

/// Errors returned by the Payload CMS client.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The login call was rejected; nothing else can run without a token.
    #[error("Payload login failed with status {status}: {message}")]
    Auth { status: u16, message: String },

    /// A non-2xx API response. `issues` carries the messages from Payload's
    /// validation-error array when the body had one.
    #[error("Payload API error {status} on {context}: {message}")]
    Api {
        status: u16,
        context: String,
        message: String,
        issues: Vec<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured CMS URL does not parse as a URL base.
    #[error("invalid Payload URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A source image URL has no usable path component.
    #[error("invalid image URL \"{url}\": {reason}")]
    InvalidImageUrl { url: String, reason: String },
}
