//! `geocode` and `city` command handlers.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use unitmap_core::{AppConfig, GeocodingResult};
use unitmap_geocoder::GeocodingResolver;

#[derive(Serialize)]
struct BatchEntry<'a> {
    address: &'a str,
    result: Option<GeocodingResult>,
}

/// Non-blank lines of `content`, trimmed, in order.
pub(crate) fn parse_address_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<GeocodingResolver> {
    let resolver = GeocodingResolver::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build geocoding resolver: {e}"))?;
    let sources: Vec<String> = resolver.sources().map(|s| s.to_string()).collect();
    tracing::debug!(providers = ?sources, "geocoding resolver ready");
    Ok(resolver)
}

/// Resolve a free-text address and print the result.
///
/// # Errors
///
/// Returns an error if the resolver cannot be built or no provider produced
/// a coordinate inside the region.
pub(crate) async fn run_geocode(config: &AppConfig, address: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let Some(result) = resolver.resolve_address(address).await else {
        tracing::error!(address, "address could not be geocoded");
        anyhow::bail!("no coordinate found for {address:?}");
    };
    crate::print_json(&result)
}

/// Resolve every address listed in `file`, one at a time, and print the
/// results aligned with the input. Unresolved addresses print as `null`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, lists no addresses, or the
/// resolver cannot be built.
pub(crate) async fn run_geocode_file(config: &AppConfig, file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let addresses = parse_address_list(&content);
    if addresses.is_empty() {
        anyhow::bail!("no addresses found in {}", file.display());
    }

    let resolver = build_resolver(config)?;
    let delay = Duration::from_millis(config.geocode_delay_ms);
    let results = resolver
        .resolve_many(&addresses, delay, |done, total, result| {
            tracing::info!(done, total, resolved = result.is_some(), "geocode progress");
        })
        .await;

    let resolved = results.iter().filter(|r| r.is_some()).count();
    tracing::info!(total = addresses.len(), resolved, "batch geocode finished");

    let entries: Vec<BatchEntry<'_>> = addresses
        .iter()
        .zip(results)
        .map(|(address, result)| BatchEntry { address, result })
        .collect();
    crate::print_json(&entries)
}

/// Resolve a target city and print the result.
///
/// # Errors
///
/// Returns an error if the resolver cannot be built or the city was not found.
pub(crate) async fn run_city(config: &AppConfig, name: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let Some(result) = resolver.resolve_city(name).await else {
        tracing::error!(city = name, "city could not be geocoded");
        anyhow::bail!("city {name:?} not found");
    };
    crate::print_json(&result)
}
