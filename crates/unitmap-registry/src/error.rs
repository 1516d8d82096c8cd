use thiserror::Error;

/// Errors from a single business-registry provider.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider reported an error in the response body.
    #[error("{provider} error: {message}")]
    Api { provider: String, message: String },

    #[error("{provider} response is missing {field}")]
    MissingField { provider: String, field: String },
}
