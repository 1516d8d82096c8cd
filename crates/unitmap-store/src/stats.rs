use std::collections::BTreeMap;

use serde::Serialize;
use unitmap_core::text::fold;
use unitmap_core::{Company, ScoreBand, Unit};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MunicipalityStats {
    pub units: usize,
    pub needs_review: usize,
}

/// Dashboard totals over the stored units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub per_company: BTreeMap<Company, usize>,
    pub per_band: BTreeMap<ScoreBand, usize>,
    /// Keyed by the accent-folded, lower-cased municipality name.
    pub per_municipality: BTreeMap<String, MunicipalityStats>,
}

impl StoreStats {
    #[must_use]
    pub fn collect<'a>(units: impl IntoIterator<Item = &'a Unit>) -> Self {
        let mut stats = Self::default();
        for unit in units {
            stats.total += 1;
            *stats.per_company.entry(unit.company).or_default() += 1;

            let band = unit.score_band();
            *stats.per_band.entry(band).or_default() += 1;

            let entry = stats
                .per_municipality
                .entry(fold(unit.address.municipality.trim()))
                .or_default();
            entry.units += 1;
            if band == ScoreBand::NeedsReview {
                entry.needs_review += 1;
            }
        }
        stats
    }
}
