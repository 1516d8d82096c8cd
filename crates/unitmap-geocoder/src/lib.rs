//! Multi-provider geocoding restricted to Paraná.
//!
//! [`GeocodingResolver`] runs an admission filter on the free-text input, then
//! walks an ordered list of [`GeocodingProvider`]s (Google, `OpenCage`,
//! Nominatim) and returns the first candidate that passes region validation.

pub mod address;
mod error;
pub mod gazetteer;
mod google;
mod http;
mod nominatim;
mod opencage;
mod provider;
mod resolver;

pub use error::ProviderError;
pub use google::GoogleGeocoder;
pub use nominatim::NominatimGeocoder;
pub use opencage::OpenCageGeocoder;
pub use provider::GeocodingProvider;
pub use resolver::GeocodingResolver;
