//! `lookup` and `import` command handlers.

use std::path::Path;

use serde::Serialize;
use unitmap_core::{load_catalog_or_default, AppConfig, Unit};
use unitmap_registry::{parse_business_id_list, RegistryLookup};
use unitmap_store::{ImportPipeline, ImportStage, StoreStats, UnitStore};

#[derive(Serialize)]
struct ImportOutput<'a> {
    units: Vec<&'a Unit>,
    not_found: &'a [String],
    not_geocoded: &'a [String],
    stats: StoreStats,
}

/// Look up one business id and print the registry record.
///
/// # Errors
///
/// Returns an error if the registry clients cannot be built or no provider
/// knows the id.
pub(crate) async fn run_lookup(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let lookup = RegistryLookup::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build registry lookup: {e}"))?;
    let Some(record) = lookup.lookup(id).await else {
        tracing::error!(business_id = id, "business id not found");
        anyhow::bail!("no registry record for {id:?}");
    };
    crate::print_json(&record)
}

/// Import every id listed in `file` and print the resulting units and stats.
///
/// # Errors
///
/// Returns an error if the file cannot be read, holds no valid ids, the
/// catalog is invalid, or a provider client cannot be built.
pub(crate) async fn run_import(config: &AppConfig, file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let ids = parse_business_id_list(&content);
    if ids.is_empty() {
        anyhow::bail!("no 14-digit business ids found in {}", file.display());
    }

    let catalog = load_catalog_or_default(&config.catalog_path)?;
    let pipeline = ImportPipeline::from_config(config, catalog.clone())?;

    tracing::info!(ids = ids.len(), file = %file.display(), "starting import");
    let report = pipeline
        .import_ids(&ids, |progress| {
            let stage = match progress.stage {
                ImportStage::Lookup => "lookup",
                ImportStage::Geocode => "geocode",
            };
            tracing::info!(
                stage,
                done = progress.done,
                total = progress.total,
                "import progress"
            );
        })
        .await;

    let mut store = UnitStore::new(catalog);
    for unit in report.units {
        store.upsert_unit(unit);
    }

    crate::print_json(&ImportOutput {
        units: store.units_by_score(),
        not_found: &report.not_found,
        not_geocoded: &report.not_geocoded,
        stats: store.stats(),
    })
}
