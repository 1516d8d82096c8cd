use thiserror::Error;
use unitmap_core::CoreError;

#[derive(Debug, Error)]
pub enum RoutingError {
    /// Fewer than two points; raised before any network call.
    #[error("at least 2 route points are required, got {got}")]
    InsufficientPoints { got: usize },

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

    /// OSRM answered with a code other than `Ok`.
    #[error("routing service returned code {code}")]
    ServiceCode { code: String },

    #[error("routing service returned no routes")]
    NoRoutes,

    #[error("malformed route geometry: {0}")]
    MalformedGeometry(String),
}

impl From<CoreError> for RoutingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientPoints { got } => RoutingError::InsufficientPoints { got },
        }
    }
}
