use thiserror::Error;

/// Why a single geocoding provider produced nothing usable.
///
/// These never cross the resolver boundary; the resolver logs them and moves
/// on to the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
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

    /// The provider answered with a non-OK status in its response body.
    #[error("{provider} returned status {status}")]
    ApiStatus { provider: String, status: String },

    #[error("{provider} returned no results")]
    NoResults { provider: String },

    /// The first candidate failed a structural check of the provider response.
    #[error("{provider} result rejected: {reason}")]
    Rejected { provider: String, reason: String },

    #[error("{provider} returned an unparseable coordinate: {value}")]
    InvalidCoordinate { provider: String, value: String },
}
