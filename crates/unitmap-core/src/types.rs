use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{compute_score, derive_status, score_band, ScoreBand};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// How exactly a geocoded coordinate matches the requested address, from
/// rooftop-exact down to an approximate centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrecisionTier {
    Rooftop,
    RangeInterpolated,
    GeometricCenter,
    Approximate,
}

impl PrecisionTier {
    /// Map a provider's `location_type` label onto the four tiers.
    ///
    /// Unrecognized labels map to [`PrecisionTier::Approximate`].
    #[must_use]
    pub fn from_provider_label(label: &str) -> Self {
        match label {
            "ROOFTOP" => Self::Rooftop,
            "RANGE_INTERPOLATED" => Self::RangeInterpolated,
            "GEOMETRIC_CENTER" => Self::GeometricCenter,
            _ => Self::Approximate,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rooftop => "ROOFTOP",
            Self::RangeInterpolated => "RANGE_INTERPOLATED",
            Self::GeometricCenter => "GEOMETRIC_CENTER",
            Self::Approximate => "APPROXIMATE",
        }
    }
}

impl std::fmt::Display for PrecisionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which geocoder produced a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderSource {
    /// Primary provider (Google Geocoding).
    Google,
    /// Secondary provider (`OpenCage`).
    OpenCage,
    /// Tertiary open provider (Nominatim / `OpenStreetMap`).
    Nominatim,
    /// Coordinates entered by hand; never produced by the resolver.
    Manual,
}

impl std::fmt::Display for GeocoderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocoderSource::Google => write!(f, "google"),
            GeocoderSource::OpenCage => write!(f, "opencage"),
            GeocoderSource::Nominatim => write!(f, "nominatim"),
            GeocoderSource::Manual => write!(f, "manual"),
        }
    }
}

/// One validated geocoding hit. Produced once per resolution and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
    pub precision: PrecisionTier,
    pub source: GeocoderSource,
    /// Set when the provider flagged the hit as a partial match of the query.
    #[serde(default)]
    pub partial_match: bool,
}

impl GeocodingResult {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Business-unit category a registry record is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Company {
    Pluma,
    Bello,
    Levo,
}

impl Company {
    pub const ALL: [Company; 3] = [Company::Pluma, Company::Bello, Company::Levo];
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Company::Pluma => write!(f, "PLUMA"),
            Company::Bello => write!(f, "BELLO"),
            Company::Levo => write!(f, "LEVO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Ok,
    Review,
    OutsideRegion,
    MunicipalityMismatch,
    /// The registry address changed since the unit was geocoded.
    Stale,
}

/// Post-hoc checks of a geocoded coordinate against the record it belongs to.
///
/// `None` means the check was not performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFlags {
    pub partial_match: Option<bool>,
    pub inside_region: Option<bool>,
    pub municipality_match: Option<bool>,
    pub cep_match: Option<bool>,
}

/// A postal address as returned by the business registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub municipality: String,
    pub uf: String,
    pub cep: String,
}

impl PostalAddress {
    /// Single-line rendering used as geocoder input:
    /// `"street, number[, complement], district, municipality - UF, cep"`.
    #[must_use]
    pub fn full_address(&self) -> String {
        let complement = self
            .complement
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!(", {c}"))
            .unwrap_or_default();
        format!(
            "{}, {}{complement}, {}, {} - {}, {}",
            self.street, self.number, self.district, self.municipality, self.uf, self.cep
        )
    }

    /// Stable fingerprint of the address, used to detect registry changes.
    ///
    /// SHA-256 over the trimmed, lower-cased fields joined by NUL. Hex-encoded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let input = [
            self.street.as_str(),
            self.number.as_str(),
            self.complement.as_deref().unwrap_or(""),
            self.district.as_str(),
            self.municipality.as_str(),
            self.uf.as_str(),
            self.cep.as_str(),
        ]
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("\x00");
        format!("{:x}", Sha256::digest(input.as_bytes()))
    }
}

/// A plotted business unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub business_id: String,
    pub legal_name: String,
    pub trade_name: Option<String>,
    pub address: PostalAddress,
    pub coordinate: Coordinate,
    pub geocoder: GeocoderSource,
    pub precision: Option<PrecisionTier>,
    pub formatted_address: Option<String>,
    pub company: Company,
    pub status: UnitStatus,
    /// Confidence score in `[0, 100]`.
    pub score: u8,
    #[serde(default)]
    pub flags: ValidationFlags,
    pub source_fetched_at: DateTime<Utc>,
    pub source_hash: Option<String>,
    /// Free text shown in the popup, e.g. the registry's primary activity.
    pub description: Option<String>,
}

impl Unit {
    /// Recompute `score` and `status` from the precision tier and flags.
    ///
    /// A `Stale` unit stays stale until it is re-imported.
    pub fn rescore(&mut self) {
        self.score = compute_score(self.precision, &self.flags);
        if self.status != UnitStatus::Stale {
            self.status = derive_status(self.score, &self.flags);
        }
    }

    #[must_use]
    pub fn score_band(&self) -> ScoreBand {
        score_band(self.score)
    }

    /// Whether `address` differs from the address this unit was geocoded from.
    #[must_use]
    pub fn is_stale_against(&self, address: &PostalAddress) -> bool {
        self.source_hash
            .as_deref()
            .is_some_and(|hash| hash != address.fingerprint())
    }
}

/// A user-chosen target city highlighted on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub coordinate: Coordinate,
}

/// One stop of a route, optionally tied to the unit it was picked from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub unit_id: Option<String>,
}

impl RoutePoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            unit_id: None,
        }
    }

    #[must_use]
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            lat: unit.coordinate.lat,
            lng: unit.coordinate.lng,
            unit_id: Some(unit.id.clone()),
        }
    }

    #[must_use]
    pub fn from_city(city: &City) -> Self {
        Self::new(city.coordinate.lat, city.coordinate.lng)
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Computed by the road-routing provider along real roads.
    Exact,
    /// Chain of great-circle segments between the input points.
    Estimated,
}

/// A computed route. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub id: String,
    pub points: Vec<RoutePoint>,
    pub distance_km: f64,
    /// Only present for [`RouteKind::Exact`] routes.
    pub duration_min: Option<f64>,
    #[serde(rename = "type")]
    pub kind: RouteKind,
    /// Ordered `[lat, lng]` path.
    pub geometry: Option<Vec<Coordinate>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> PostalAddress {
        PostalAddress {
            street: "Rua XV de Novembro".to_string(),
            number: "1000".to_string(),
            complement: None,
            district: "Centro".to_string(),
            municipality: "Curitiba".to_string(),
            uf: "PR".to_string(),
            cep: "80060-000".to_string(),
        }
    }

    fn sample_unit() -> Unit {
        let address = sample_address();
        Unit {
            id: "cnpj-11222333000181".to_string(),
            business_id: "11222333000181".to_string(),
            legal_name: "PLUMA CONFORTO LTDA".to_string(),
            trade_name: None,
            source_hash: Some(address.fingerprint()),
            address,
            coordinate: Coordinate::new(-25.43, -49.27),
            geocoder: GeocoderSource::Google,
            precision: Some(PrecisionTier::RangeInterpolated),
            formatted_address: None,
            company: Company::Pluma,
            status: UnitStatus::Ok,
            score: 0,
            flags: ValidationFlags {
                partial_match: Some(false),
                inside_region: Some(true),
                municipality_match: Some(true),
                cep_match: Some(false),
            },
            source_fetched_at: Utc::now(),
            description: None,
        }
    }

    #[test]
    fn precision_label_mapping_defaults_to_approximate() {
        assert_eq!(
            PrecisionTier::from_provider_label("ROOFTOP"),
            PrecisionTier::Rooftop
        );
        assert_eq!(
            PrecisionTier::from_provider_label("RANGE_INTERPOLATED"),
            PrecisionTier::RangeInterpolated
        );
        assert_eq!(
            PrecisionTier::from_provider_label("GEOMETRIC_CENTER"),
            PrecisionTier::GeometricCenter
        );
        assert_eq!(
            PrecisionTier::from_provider_label("SOMETHING_NEW"),
            PrecisionTier::Approximate
        );
    }

    #[test]
    fn full_address_skips_blank_complement() {
        let mut address = sample_address();
        assert_eq!(
            address.full_address(),
            "Rua XV de Novembro, 1000, Centro, Curitiba - PR, 80060-000"
        );
        address.complement = Some("Sala 2".to_string());
        assert_eq!(
            address.full_address(),
            "Rua XV de Novembro, 1000, Sala 2, Centro, Curitiba - PR, 80060-000"
        );
        address.complement = Some("  ".to_string());
        assert!(!address.full_address().contains(",  ,"));
    }

    #[test]
    fn fingerprint_ignores_case_and_padding() {
        let a = sample_address();
        let mut b = sample_address();
        b.municipality = "  CURITIBA ".to_string();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.number = "1001".to_string();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn rescore_range_interpolated_unit_is_acceptable() {
        let mut unit = sample_unit();
        unit.rescore();
        assert_eq!(unit.score, 60);
        assert_eq!(unit.score_band(), ScoreBand::Acceptable);
        assert_eq!(unit.status, UnitStatus::Ok);
    }

    #[test]
    fn stale_detection_uses_address_fingerprint() {
        let unit = sample_unit();
        assert!(!unit.is_stale_against(&sample_address()));
        let mut moved = sample_address();
        moved.street = "Avenida Sete de Setembro".to_string();
        assert!(unit.is_stale_against(&moved));
    }

    #[test]
    fn route_kind_serializes_as_type_tag() {
        let route = RouteResult {
            id: "r1".to_string(),
            points: vec![RoutePoint::new(0.0, 0.0), RoutePoint::new(1.0, 1.0)],
            distance_km: 157.2,
            duration_min: None,
            kind: RouteKind::Estimated,
            geometry: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["type"], "estimated");
    }
}
