use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; provider API keys are optional and an
/// empty key counts as unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("UNITMAP_ENV", "development"))?;
    let log_level = or_default("UNITMAP_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("UNITMAP_CATALOG_PATH", "./config/catalog.yaml"));

    let google_api_key = optional("GOOGLE_GEOCODING_API_KEY");
    let opencage_api_key = optional("OPENCAGE_API_KEY");
    let nominatim_user_agent = or_default(
        "UNITMAP_NOMINATIM_USER_AGENT",
        "unitmap/0.1 (contato@exemplo.com)",
    );
    let osrm_base_url = or_default("UNITMAP_OSRM_BASE_URL", "https://router.project-osrm.org")
        .trim_end_matches('/')
        .to_string();

    let http_timeout_secs = parse_u64("UNITMAP_HTTP_TIMEOUT_SECS", "15")?;
    if http_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "UNITMAP_HTTP_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let geocode_delay_ms = parse_u64("UNITMAP_GEOCODE_DELAY_MS", "100")?;
    let registry_delay_ms = parse_u64("UNITMAP_REGISTRY_DELAY_MS", "500")?;
    let import_delay_ms = parse_u64("UNITMAP_IMPORT_DELAY_MS", "200")?;
    let prefer_exact_routes = parse_bool("UNITMAP_PREFER_EXACT_ROUTES", "true")?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        google_api_key,
        opencage_api_key,
        nominatim_user_agent,
        osrm_base_url,
        http_timeout_secs,
        geocode_delay_ms,
        registry_delay_ms,
        import_delay_ms,
        prefer_exact_routes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UNITMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
