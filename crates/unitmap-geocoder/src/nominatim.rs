//! Tertiary provider: Nominatim (`OpenStreetMap`).
//!
//! The public instance's usage policy requires an identifying User-Agent, so
//! the agent string is a constructor argument rather than a constant.

use reqwest::{Client, Url};
use serde::Deserialize;
use unitmap_core::{GeocoderSource, GeocodingResult, PrecisionTier};

use crate::address::normalize_with_country;
use crate::error::ProviderError;
use crate::http::{build_client, endpoint_url, get_json};
use crate::provider::GeocodingProvider;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";
const ENDPOINT_PATH: &str = "search";
const PROVIDER: &str = "nominatim";

/// Nominatim encodes coordinates as JSON strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
}

impl NominatimGeocoder {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            endpoint: endpoint_url(base_url, ENDPOINT_PATH)?,
        })
    }
}

fn parse_coordinate(value: &str) -> Result<f64, ProviderError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ProviderError::InvalidCoordinate {
            provider: PROVIDER.to_string(),
            value: value.to_string(),
        })
}

#[async_trait::async_trait]
impl GeocodingProvider for NominatimGeocoder {
    fn source(&self) -> GeocoderSource {
        GeocoderSource::Nominatim
    }

    async fn attempt(&self, address: &str) -> Result<GeocodingResult, ProviderError> {
        let query = normalize_with_country(address);
        tracing::debug!(provider = PROVIDER, query, "requesting geocode");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", &query)
            .append_pair("countrycodes", "br")
            .append_pair("limit", "1")
            .append_pair("addressdetails", "1");

        let places: Vec<Place> = get_json(&self.client, url, "nominatim search").await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoResults {
                provider: PROVIDER.to_string(),
            })?;

        Ok(GeocodingResult {
            latitude: parse_coordinate(&place.lat)?,
            longitude: parse_coordinate(&place.lon)?,
            formatted_address: place.display_name,
            precision: PrecisionTier::Approximate,
            source: GeocoderSource::Nominatim,
            partial_match: false,
        })
    }
}
