//! Batch import: registry lookup, then geocoding, classification, flags and
//! scoring for every record found.

use std::time::Duration;

use serde::Serialize;
use unitmap_core::{AppConfig, Catalog, Unit};
use unitmap_geocoder::{GeocodingResolver, ProviderError};
use unitmap_registry::{RegistryError, RegistryLookup};

use crate::flags::unit_from_record;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("geocoder setup failed: {0}")]
    Geocoder(#[from] ProviderError),

    #[error("registry setup failed: {0}")]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Lookup,
    Geocode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    pub stage: ImportStage,
    pub done: usize,
    pub total: usize,
}

/// Outcome of one import run. Per-id failures are reported, not raised.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub units: Vec<Unit>,
    /// Ids no registry provider knew.
    pub not_found: Vec<String>,
    /// Ids whose registry address could not be geocoded.
    pub not_geocoded: Vec<String>,
}

pub struct ImportPipeline {
    registry: RegistryLookup,
    resolver: GeocodingResolver,
    catalog: Catalog,
    registry_delay: Duration,
    import_delay: Duration,
}

impl ImportPipeline {
    #[must_use]
    pub fn new(
        registry: RegistryLookup,
        resolver: GeocodingResolver,
        catalog: Catalog,
        registry_delay: Duration,
        import_delay: Duration,
    ) -> Self {
        Self {
            registry,
            resolver,
            catalog,
            registry_delay,
            import_delay,
        }
    }

    /// # Errors
    ///
    /// Returns [`ImportError`] if a provider HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig, catalog: Catalog) -> Result<Self, ImportError> {
        Ok(Self::new(
            RegistryLookup::from_config(config)?,
            GeocodingResolver::from_config(config)?,
            catalog,
            Duration::from_millis(config.registry_delay_ms),
            Duration::from_millis(config.import_delay_ms),
        ))
    }

    /// Import normalized business ids.
    pub async fn import_ids<F>(&self, ids: &[String], mut on_progress: F) -> ImportReport
    where
        F: FnMut(ImportProgress),
    {
        let records = self
            .registry
            .lookup_many(ids, self.registry_delay, |done, total, _| {
                on_progress(ImportProgress {
                    stage: ImportStage::Lookup,
                    done,
                    total,
                });
            })
            .await;

        let mut report = ImportReport::default();
        let mut found = Vec::with_capacity(records.len());
        for (id, record) in ids.iter().zip(records) {
            match record {
                Some(record) => found.push(record),
                None => report.not_found.push(id.clone()),
            }
        }

        let total = found.len();
        for (index, record) in found.iter().enumerate() {
            match self.resolver.resolve_address(&record.full_address()).await {
                Some(result) => {
                    let company = self
                        .catalog
                        .classify(&record.business_id, &record.legal_name);
                    let unit = unit_from_record(record, &result, company);
                    tracing::info!(
                        unit_id = %unit.id,
                        company = %unit.company,
                        score = unit.score,
                        "unit imported"
                    );
                    report.units.push(unit);
                }
                None => {
                    tracing::warn!(
                        business_id = %record.business_id,
                        "registry address not geocoded"
                    );
                    report.not_geocoded.push(record.business_id.clone());
                }
            }

            on_progress(ImportProgress {
                stage: ImportStage::Geocode,
                done: index + 1,
                total,
            });

            if index + 1 < total && !self.import_delay.is_zero() {
                tokio::time::sleep(self.import_delay).await;
            }
        }

        tracing::info!(
            imported = report.units.len(),
            not_found = report.not_found.len(),
            not_geocoded = report.not_geocoded.len(),
            "import finished"
        );
        report
    }
}
