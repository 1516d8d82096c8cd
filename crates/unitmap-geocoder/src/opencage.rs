//! Secondary provider: `OpenCage` geocoder. Always reports `APPROXIMATE`.

use reqwest::{Client, Url};
use serde::Deserialize;
use unitmap_core::{GeocoderSource, GeocodingResult, PrecisionTier};

use crate::address::normalize_with_country;
use crate::error::ProviderError;
use crate::http::{build_client, endpoint_url, get_json};
use crate::provider::GeocodingProvider;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/";
const ENDPOINT_PATH: &str = "geocode/v1/json";
const PROVIDER: &str = "opencage";

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageCandidate>,
}

#[derive(Debug, Deserialize)]
struct OpenCageCandidate {
    formatted: String,
    geometry: OpenCageGeometry,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}

pub struct OpenCageGeocoder {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl OpenCageGeocoder {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, "unitmap/0.1 (geocoding)")?,
            api_key: api_key.to_owned(),
            endpoint: endpoint_url(base_url, ENDPOINT_PATH)?,
        })
    }
}

#[async_trait::async_trait]
impl GeocodingProvider for OpenCageGeocoder {
    fn source(&self) -> GeocoderSource {
        GeocoderSource::OpenCage
    }

    async fn attempt(&self, address: &str) -> Result<GeocodingResult, ProviderError> {
        let query = normalize_with_country(address);
        tracing::debug!(provider = PROVIDER, query, "requesting geocode");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("key", &self.api_key)
            .append_pair("language", "pt")
            .append_pair("countrycode", "br")
            .append_pair("limit", "1");

        let response: OpenCageResponse = get_json(&self.client, url, "opencage geocode").await?;
        let candidate =
            response
                .results
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::NoResults {
                    provider: PROVIDER.to_string(),
                })?;

        Ok(GeocodingResult {
            latitude: candidate.geometry.lat,
            longitude: candidate.geometry.lng,
            formatted_address: candidate.formatted,
            precision: PrecisionTier::Approximate,
            source: GeocoderSource::OpenCage,
            partial_match: false,
        })
    }
}
