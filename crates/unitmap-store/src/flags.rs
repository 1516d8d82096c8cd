//! Post-hoc checks of a geocoding result against its registry record, and
//! assembly of the resulting [`Unit`].

use chrono::Utc;
use unitmap_core::text::{contains_folded, digits};
use unitmap_core::{
    is_inside_region, Company, GeocodingResult, PostalAddress, Unit, UnitStatus, ValidationFlags,
};
use unitmap_registry::CompanyRecord;

/// Derive validation flags for `result` geocoded from `address`.
///
/// Municipality and CEP checks are skipped (`None`) when the registry left
/// the field blank.
#[must_use]
pub fn derive_flags(result: &GeocodingResult, address: &PostalAddress) -> ValidationFlags {
    let municipality = address.municipality.trim();
    let municipality_match =
        (!municipality.is_empty()).then(|| contains_folded(&result.formatted_address, municipality));

    let cep = digits(&address.cep);
    let cep_match = (!cep.is_empty()).then(|| digits(&result.formatted_address).contains(&cep));

    ValidationFlags {
        partial_match: Some(result.partial_match),
        inside_region: Some(is_inside_region(result.latitude, result.longitude)),
        municipality_match,
        cep_match,
    }
}

/// Unit id derived from a business id.
#[must_use]
pub fn unit_id(business_id: &str) -> String {
    format!("cnpj-{business_id}")
}

/// Build a scored unit from a registry record and its geocoding result.
#[must_use]
pub fn unit_from_record(
    record: &CompanyRecord,
    result: &GeocodingResult,
    company: Company,
) -> Unit {
    let mut unit = Unit {
        id: unit_id(&record.business_id),
        business_id: record.business_id.clone(),
        legal_name: record.legal_name.clone(),
        trade_name: record.trade_name.clone(),
        address: record.address.clone(),
        coordinate: result.coordinate(),
        geocoder: result.source,
        precision: Some(result.precision),
        formatted_address: Some(result.formatted_address.clone()),
        company,
        status: UnitStatus::Ok,
        score: 0,
        flags: derive_flags(result, &record.address),
        source_fetched_at: Utc::now(),
        source_hash: Some(record.address.fingerprint()),
        description: Some(record.primary_activity.clone()),
    };
    unit.rescore();
    unit
}

#[cfg(test)]
mod tests {
    use unitmap_core::{GeocoderSource, PrecisionTier};

    use super::*;

    fn address() -> PostalAddress {
        PostalAddress {
            street: "RUA XV DE NOVEMBRO".to_string(),
            number: "1000".to_string(),
            complement: None,
            district: "CENTRO".to_string(),
            municipality: "MARINGÁ".to_string(),
            uf: "PR".to_string(),
            cep: "87013-000".to_string(),
        }
    }

    fn result(lat: f64, lng: f64, formatted: &str, precision: PrecisionTier) -> GeocodingResult {
        GeocodingResult {
            latitude: lat,
            longitude: lng,
            formatted_address: formatted.to_string(),
            precision,
            source: GeocoderSource::Google,
            partial_match: false,
        }
    }

    #[test]
    fn matching_result_sets_all_positive_flags() {
        let r = result(
            -23.42,
            -51.94,
            "R. Quinze de Novembro, 1000 - Centro, Maringa - PR, 87013-000, Brasil",
            PrecisionTier::Rooftop,
        );
        let flags = derive_flags(&r, &address());
        assert_eq!(flags.partial_match, Some(false));
        assert_eq!(flags.inside_region, Some(true));
        assert_eq!(flags.municipality_match, Some(true));
        assert_eq!(flags.cep_match, Some(true));
    }

    #[test]
    fn divergent_municipality_and_region_are_flagged() {
        let r = result(
            -23.55,
            -46.63,
            "Rua XV de Novembro, São Paulo - SP, Brasil",
            PrecisionTier::RangeInterpolated,
        );
        let flags = derive_flags(&r, &address());
        assert_eq!(flags.inside_region, Some(false));
        assert_eq!(flags.municipality_match, Some(false));
        assert_eq!(flags.cep_match, Some(false));
    }

    #[test]
    fn blank_registry_fields_skip_checks() {
        let mut blank = address();
        blank.municipality = "  ".to_string();
        blank.cep = String::new();
        let r = result(-25.43, -49.27, "Curitiba - PR", PrecisionTier::Approximate);
        let flags = derive_flags(&r, &blank);
        assert_eq!(flags.municipality_match, None);
        assert_eq!(flags.cep_match, None);
    }

    #[test]
    fn unit_from_record_is_scored() {
        let record = CompanyRecord {
            business_id: "11222333000181".to_string(),
            legal_name: "PLUMA LTDA".to_string(),
            trade_name: None,
            primary_activity: "Comércio varejista de móveis".to_string(),
            address: address(),
            registration_status: None,
            phone: None,
            email: None,
        };
        let r = result(
            -23.42,
            -51.94,
            "Maringá - PR, 87013-000",
            PrecisionTier::Rooftop,
        );
        let unit = unit_from_record(&record, &r, Company::Pluma);
        assert_eq!(unit.id, "cnpj-11222333000181");
        assert_eq!(unit.score, 100);
        assert_eq!(unit.status, UnitStatus::Ok);
        assert_eq!(unit.source_hash, Some(record.address.fingerprint()));
        assert!(!unit.is_stale_against(&record.address));
    }
}
