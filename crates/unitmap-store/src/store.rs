use std::collections::BTreeMap;

use tokio::sync::mpsc;
use unitmap_core::text::fold;
use unitmap_core::{Catalog, City, ConfigError, Company, RouteResult, Unit, UnitStatus};
use unitmap_registry::CompanyRecord;
use unitmap_routing::RouteHistory;

use crate::events::StoreEvent;
use crate::stats::StoreStats;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("city already highlighted: {name}")]
    DuplicateCity { name: String },

    #[error("city name is empty")]
    EmptyCityName,

    #[error(transparent)]
    Catalog(#[from] ConfigError),
}

/// Owner of every unit, route and highlighted city on the map.
#[derive(Debug, Default)]
pub struct UnitStore {
    units: BTreeMap<String, Unit>,
    routes: RouteHistory,
    cities: Vec<City>,
    catalog: Catalog,
}

impl UnitStore {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Insert or replace a unit by id. Returns the replaced unit, if any.
    pub fn upsert_unit(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.id.clone(), unit)
    }

    pub fn remove_unit(&mut self, unit_id: &str) -> Option<Unit> {
        let removed = self.units.remove(unit_id);
        if removed.is_some() {
            tracing::info!(unit_id, "unit removed");
        }
        removed
    }

    #[must_use]
    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.get(unit_id)
    }

    /// Units ordered by id.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Lowest score first, ties broken by id. Used for the review list.
    #[must_use]
    pub fn units_by_score(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.values().collect();
        units.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.id.cmp(&b.id)));
        units
    }

    pub fn rescore_all(&mut self) {
        for unit in self.units.values_mut() {
            unit.rescore();
        }
    }

    /// Re-run the classifier over every unit. Returns how many changed company.
    pub fn reclassify_all(&mut self) -> usize {
        let mut changed = 0;
        for unit in self.units.values_mut() {
            let company = self.catalog.classify(&unit.business_id, &unit.legal_name);
            if company != unit.company {
                unit.company = company;
                changed += 1;
            }
        }
        changed
    }

    /// Compare a fresh registry record against the stored unit and mark the
    /// unit stale when its address changed. Returns whether it was marked.
    pub fn refresh_from_record(&mut self, unit_id: &str, record: &CompanyRecord) -> bool {
        let Some(unit) = self.units.get_mut(unit_id) else {
            return false;
        };
        if !unit.is_stale_against(&record.address) {
            return false;
        }
        tracing::warn!(unit_id, business_id = %record.business_id, "registry address changed");
        unit.status = UnitStatus::Stale;
        true
    }

    pub fn record_route(&mut self, route: RouteResult) {
        self.routes.push(route);
    }

    #[must_use]
    pub fn latest_route(&self) -> Option<&RouteResult> {
        self.routes.latest()
    }

    /// Oldest first.
    #[must_use]
    pub fn routes(&self) -> &[RouteResult] {
        self.routes.routes()
    }

    /// Highlight a city. Names are compared ignoring case and accents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCity`] when the city is already
    /// highlighted, or [`StoreError::EmptyCityName`] for a blank name.
    pub fn add_city(&mut self, city: City) -> Result<(), StoreError> {
        let name = city.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyCityName);
        }
        if self.city_index(name).is_some() {
            return Err(StoreError::DuplicateCity {
                name: name.to_string(),
            });
        }
        self.cities.push(city);
        Ok(())
    }

    pub fn remove_city(&mut self, name: &str) -> Option<City> {
        let index = self.city_index(name)?;
        Some(self.cities.remove(index))
    }

    pub fn clear_cities(&mut self) {
        self.cities.clear();
    }

    /// In insertion order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    fn city_index(&self, name: &str) -> Option<usize> {
        let key = fold(name.trim());
        self.cities
            .iter()
            .position(|city| fold(city.name.trim()) == key)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Replace one company's id list and reclassify every unit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] when the new list conflicts with
    /// another company's ids; the catalog is left unchanged.
    pub fn set_company_ids(
        &mut self,
        company: Company,
        ids: Vec<String>,
    ) -> Result<usize, StoreError> {
        self.catalog.set_ids(company, ids)?;
        Ok(self.reclassify_all())
    }

    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats::collect(self.units.values())
    }

    /// Apply one event. Returns whether anything was removed.
    pub fn apply(&mut self, event: StoreEvent) -> bool {
        match event {
            StoreEvent::RemoveUnitRequested { unit_id } => self.remove_unit(&unit_id).is_some(),
            StoreEvent::RemoveCityRequested { name } => self.remove_city(&name).is_some(),
        }
    }

    /// Apply events until every sender is dropped. Returns the number of
    /// events that removed something.
    pub async fn run_event_loop(&mut self, mut rx: mpsc::Receiver<StoreEvent>) -> usize {
        let mut applied = 0;
        while let Some(event) = rx.recv().await {
            tracing::debug!(?event, "store event received");
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
