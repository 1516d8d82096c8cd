//! Ordered fallback across geocoding providers.
//!
//! Providers are tried strictly in sequence. The first candidate that parses,
//! passes the provider's own structural checks and lies inside the region is
//! returned; any other outcome is logged and the next provider is tried.

use std::time::Duration;

use unitmap_core::{AppConfig, GeocoderSource, GeocodingResult, RegionBounds};

use crate::address::{city_query, is_admissible};
use crate::error::ProviderError;
use crate::google::GoogleGeocoder;
use crate::nominatim::NominatimGeocoder;
use crate::opencage::OpenCageGeocoder;
use crate::provider::GeocodingProvider;

pub struct GeocodingResolver {
    providers: Vec<Box<dyn GeocodingProvider>>,
    region: RegionBounds,
}

impl GeocodingResolver {
    /// A resolver over `providers`, tried in the given order.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn GeocodingProvider>>) -> Self {
        Self {
            providers,
            region: RegionBounds::parana(),
        }
    }

    /// Build the production chain from configuration.
    ///
    /// Google is included only with an API key, then `OpenCage` only with an
    /// API key, then Nominatim always.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let timeout = config.http_timeout_secs;
        let mut providers: Vec<Box<dyn GeocodingProvider>> = Vec::with_capacity(3);

        if let Some(key) = &config.google_api_key {
            providers.push(Box::new(GoogleGeocoder::new(key, timeout)?));
        }
        if let Some(key) = &config.opencage_api_key {
            providers.push(Box::new(OpenCageGeocoder::new(key, timeout)?));
        }
        providers.push(Box::new(NominatimGeocoder::new(
            &config.nominatim_user_agent,
            timeout,
        )?));

        Ok(Self::new(providers))
    }

    /// Sources of the configured providers, in fallback order.
    pub fn sources(&self) -> impl Iterator<Item = GeocoderSource> + '_ {
        self.providers.iter().map(|p| p.source())
    }

    /// Resolve a free-text address to a validated coordinate.
    ///
    /// Returns `None` without any network call when the input fails the
    /// admission filter, and `None` when every provider fails.
    pub async fn resolve_address(&self, address: &str) -> Option<GeocodingResult> {
        if !is_admissible(address) {
            tracing::warn!(address, "address rejected before geocoding");
            return None;
        }

        for provider in &self.providers {
            let source = provider.source();
            tracing::debug!(provider = %source, address, "attempting provider");

            let result = match provider.attempt(address).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(provider = %source, address, error = %e, "provider failed");
                    continue;
                }
            };

            if !result.latitude.is_finite() || !result.longitude.is_finite() {
                tracing::warn!(
                    provider = %source,
                    address,
                    "provider returned a non-finite coordinate"
                );
                continue;
            }

            if let Some(zone) = self.region.excluded_by(result.latitude, result.longitude) {
                tracing::warn!(
                    provider = %source,
                    address,
                    lat = result.latitude,
                    lng = result.longitude,
                    zone = zone.name,
                    "coordinate in exclusion zone, discarded"
                );
                continue;
            }
            if !self.region.contains(result.latitude, result.longitude) {
                tracing::warn!(
                    provider = %source,
                    address,
                    lat = result.latitude,
                    lng = result.longitude,
                    "coordinate outside region, discarded"
                );
                continue;
            }

            tracing::info!(
                provider = %source,
                address,
                lat = result.latitude,
                lng = result.longitude,
                precision = %result.precision,
                "address geocoded"
            );
            return Some(result);
        }

        tracing::warn!(address, "all geocoding providers failed");
        None
    }

    /// Resolve a target-city name, naming the region when the caller did not.
    pub async fn resolve_city(&self, name: &str) -> Option<GeocodingResult> {
        if name.trim().is_empty() {
            return None;
        }
        self.resolve_address(&city_query(name)).await
    }

    /// Resolve `addresses` one at a time, pausing `delay` between items.
    ///
    /// The output is aligned with the input. `on_progress` is called after
    /// each item with `(processed, total, result)`.
    pub async fn resolve_many<F>(
        &self,
        addresses: &[String],
        delay: Duration,
        mut on_progress: F,
    ) -> Vec<Option<GeocodingResult>>
    where
        F: FnMut(usize, usize, Option<&GeocodingResult>),
    {
        let total = addresses.len();
        let mut results = Vec::with_capacity(total);

        for (index, address) in addresses.iter().enumerate() {
            let result = self.resolve_address(address).await;
            on_progress(index + 1, total, result.as_ref());
            results.push(result);

            if index + 1 < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        results
    }
}
