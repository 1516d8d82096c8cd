//! Domain types and pure decision logic for the unit map.
//!
//! Everything in this crate is free of I/O except configuration and catalog
//! loading: the region predicate, the confidence scorer, the great-circle
//! distance estimator and the business-unit classifier.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod region;
pub mod scoring;
pub mod text;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, load_catalog_or_default, Catalog, KeywordRule};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{great_circle_distance_km, sum_path_distance_km, EARTH_RADIUS_KM};
pub use region::{is_inside_region, ExclusionZone, RegionBounds};
pub use scoring::{compute_score, derive_status, score_band, ScoreBand};
pub use types::{
    City, Company, Coordinate, GeocoderSource, GeocodingResult, PostalAddress, PrecisionTier,
    RouteKind, RoutePoint, RouteResult, Unit, UnitStatus, ValidationFlags,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("at least 2 points are required, got {got}")]
    InsufficientPoints { got: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
