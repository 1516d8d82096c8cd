//! Road-routing client for the OSRM HTTP API.
//!
//! One request per route carrying every point in order as a semicolon-separated
//! `lng,lat` list. The first returned route is used; its GeoJSON geometry is
//! converted from `[lng, lat]` to internal `(lat, lng)` order.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use unitmap_core::Coordinate;

use crate::error::RoutingError;

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// A road-network route as reported by the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactRoute {
    pub distance_km: f64,
    pub duration_min: f64,
    pub geometry: Vec<Coordinate>,
}

/// A service that computes routes along real roads.
#[async_trait::async_trait]
pub trait ExactRouter: Send + Sync {
    async fn route(&self, points: &[Coordinate]) -> Result<ExactRoute, RoutingError>;
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: LineString,
}

#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<Vec<f64>>,
}

pub struct OsrmClient {
    client: Client,
    base_url: Url,
}

impl OsrmClient {
    /// Creates a client pointed at the public OSRM demo server.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, RoutingError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs)
    }

    /// Creates a client for a self-hosted OSRM instance or a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`RoutingError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("unitmap/0.1 (routing)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| RoutingError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    fn build_url(&self, points: &[Coordinate]) -> Result<Url, RoutingError> {
        let coords = points
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        let mut url = self
            .base_url
            .join(&format!("route/v1/driving/{coords}"))
            .map_err(|e| RoutingError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

fn to_lat_lng(position: &[f64]) -> Result<Coordinate, RoutingError> {
    match position {
        [lng, lat, ..] => Ok(Coordinate::new(*lat, *lng)),
        other => Err(RoutingError::MalformedGeometry(format!(
            "expected [lng, lat], got {other:?}"
        ))),
    }
}

#[async_trait::async_trait]
impl ExactRouter for OsrmClient {
    async fn route(&self, points: &[Coordinate]) -> Result<ExactRoute, RoutingError> {
        if points.len() < 2 {
            return Err(RoutingError::InsufficientPoints { got: points.len() });
        }

        let url = self.build_url(points)?;
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Deserialize {
                context: "osrm route".to_string(),
                source: e,
            })?;

        if let Some(code) = parsed.code.filter(|c| c != "Ok") {
            return Err(RoutingError::ServiceCode { code });
        }

        let route = parsed
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoutes)?;

        let geometry = route
            .geometry
            .coordinates
            .iter()
            .map(|position| to_lat_lng(position.as_slice()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExactRoute {
            distance_km: route.distance / 1000.0,
            duration_min: route.duration / 60.0,
            geometry,
        })
    }
}
