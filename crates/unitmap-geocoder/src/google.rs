//! Primary provider: Google Geocoding API.
//!
//! Requests are biased to Brazil and restricted to the `PR` administrative
//! area. The first candidate must carry a state component naming Paraná and a
//! municipality or locality component, otherwise it is rejected.

use reqwest::{Client, Url};
use serde::Deserialize;
use unitmap_core::text::contains_folded;
use unitmap_core::{GeocoderSource, GeocodingResult, PrecisionTier};

use crate::address::normalize_with_region;
use crate::error::ProviderError;
use crate::http::{build_client, endpoint_url, get_json};
use crate::provider::GeocodingProvider;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const ENDPOINT_PATH: &str = "maps/api/geocode/json";
const PROVIDER: &str = "google";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    formatted_address: String,
    geometry: Geometry,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    #[serde(default)]
    partial_match: bool,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
    #[serde(default)]
    location_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl AddressComponent {
    fn has_type(&self, wanted: &str) -> bool {
        self.types.iter().any(|t| t == wanted)
    }
}

pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl GoogleGeocoder {
    /// Creates a client pointed at the production Google Geocoding API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
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

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &self.api_key)
            .append_pair("region", "br")
            .append_pair("language", "pt-BR")
            .append_pair("components", "administrative_area:PR|country:BR");
        url
    }
}

/// Structural checks on the first candidate.
fn check_components(components: &[AddressComponent]) -> Result<(), ProviderError> {
    let names_region = components.iter().any(|c| {
        c.has_type("administrative_area_level_1")
            && (c.short_name == "PR" || contains_folded(&c.long_name, "Paraná"))
    });
    if !names_region {
        return Err(ProviderError::Rejected {
            provider: PROVIDER.to_string(),
            reason: "no administrative_area_level_1 component for Paraná".to_string(),
        });
    }

    let names_city = components
        .iter()
        .any(|c| c.has_type("administrative_area_level_2") || c.has_type("locality"));
    if !names_city {
        return Err(ProviderError::Rejected {
            provider: PROVIDER.to_string(),
            reason: "no municipality or locality component".to_string(),
        });
    }

    Ok(())
}

#[async_trait::async_trait]
impl GeocodingProvider for GoogleGeocoder {
    fn source(&self) -> GeocoderSource {
        GeocoderSource::Google
    }

    async fn attempt(&self, address: &str) -> Result<GeocodingResult, ProviderError> {
        let query = normalize_with_region(address);
        tracing::debug!(provider = PROVIDER, query, "requesting geocode");

        let response: GeocodeResponse =
            get_json(&self.client, self.build_url(&query), "google geocode").await?;

        if response.status != "OK" {
            if let Some(message) = &response.error_message {
                tracing::debug!(provider = PROVIDER, message, "provider error message");
            }
            return Err(ProviderError::ApiStatus {
                provider: PROVIDER.to_string(),
                status: response.status,
            });
        }

        let candidate =
            response
                .results
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::NoResults {
                    provider: PROVIDER.to_string(),
                })?;

        check_components(&candidate.address_components)?;

        let precision = candidate
            .geometry
            .location_type
            .as_deref()
            .map_or(PrecisionTier::Approximate, PrecisionTier::from_provider_label);

        Ok(GeocodingResult {
            latitude: candidate.geometry.location.lat,
            longitude: candidate.geometry.location.lng,
            formatted_address: candidate.formatted_address,
            precision,
            source: GeocoderSource::Google,
            partial_match: candidate.partial_match,
        })
    }
}
