use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "UNITMAP_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.catalog_path,
        std::path::PathBuf::from("./config/catalog.yaml")
    );
    assert!(cfg.google_api_key.is_none());
    assert!(cfg.opencage_api_key.is_none());
    assert_eq!(cfg.nominatim_user_agent, "unitmap/0.1 (contato@exemplo.com)");
    assert_eq!(cfg.osrm_base_url, "https://router.project-osrm.org");
    assert_eq!(cfg.http_timeout_secs, 15);
    assert_eq!(cfg.geocode_delay_ms, 100);
    assert_eq!(cfg.registry_delay_ms, 500);
    assert_eq!(cfg.import_delay_ms, 200);
    assert!(cfg.prefer_exact_routes);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("UNITMAP_ENV", "production");
    map.insert("GOOGLE_GEOCODING_API_KEY", "g-key");
    map.insert("OPENCAGE_API_KEY", "oc-key");
    map.insert("UNITMAP_OSRM_BASE_URL", "http://localhost:5000/");
    map.insert("UNITMAP_GEOCODE_DELAY_MS", "0");
    map.insert("UNITMAP_PREFER_EXACT_ROUTES", "false");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.google_api_key.as_deref(), Some("g-key"));
    assert_eq!(cfg.opencage_api_key.as_deref(), Some("oc-key"));
    assert_eq!(cfg.osrm_base_url, "http://localhost:5000");
    assert_eq!(cfg.geocode_delay_ms, 0);
    assert!(!cfg.prefer_exact_routes);
}

#[test]
fn blank_api_key_counts_as_unset() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_GEOCODING_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.google_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_delay() {
    let mut map = HashMap::new();
    map.insert("UNITMAP_REGISTRY_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNITMAP_REGISTRY_DELAY_MS"),
        "expected InvalidEnvVar(UNITMAP_REGISTRY_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("UNITMAP_HTTP_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNITMAP_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(UNITMAP_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bool() {
    let mut map = HashMap::new();
    map.insert("UNITMAP_PREFER_EXACT_ROUTES", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNITMAP_PREFER_EXACT_ROUTES"
    ));
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_GEOCODING_API_KEY", "super-secret-google");
    map.insert("OPENCAGE_API_KEY", "super-secret-opencage");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
