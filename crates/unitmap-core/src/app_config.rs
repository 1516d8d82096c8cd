use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub google_api_key: Option<String>,
    pub opencage_api_key: Option<String>,
    pub nominatim_user_agent: String,
    pub osrm_base_url: String,
    pub http_timeout_secs: u64,
    /// Pause between consecutive geocoding requests in a batch.
    pub geocode_delay_ms: u64,
    /// Pause between consecutive registry lookups in a batch.
    pub registry_delay_ms: u64,
    /// Pause between imported records.
    pub import_delay_ms: u64,
    pub prefer_exact_routes: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "opencage_api_key",
                &self.opencage_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("nominatim_user_agent", &self.nominatim_user_agent)
            .field("osrm_base_url", &self.osrm_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("geocode_delay_ms", &self.geocode_delay_ms)
            .field("registry_delay_ms", &self.registry_delay_ms)
            .field("import_delay_ms", &self.import_delay_ms)
            .field("prefer_exact_routes", &self.prefer_exact_routes)
            .finish()
    }
}
