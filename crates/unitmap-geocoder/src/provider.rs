use unitmap_core::{GeocoderSource, GeocodingResult};

use crate::error::ProviderError;

/// One geocoding backend in the resolver's fallback chain.
///
/// `attempt` receives the admitted free-text address and applies the
/// provider's own query normalization. It returns the provider's first
/// candidate; region validation is left to the resolver.
#[async_trait::async_trait]
pub trait GeocodingProvider: Send + Sync {
    fn source(&self) -> GeocoderSource;

    async fn attempt(&self, address: &str) -> Result<GeocodingResult, ProviderError>;
}
