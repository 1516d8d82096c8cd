//! Geocoding confidence scorer.
//!
//! Additive contributions, summed and clamped to `[0, 100]`:
//!
//! | Factor                          | Points |
//! |---------------------------------|--------|
//! | `ROOFTOP`                       | +60    |
//! | `RANGE_INTERPOLATED`            | +30    |
//! | `GEOMETRIC_CENTER`/`APPROXIMATE`| +10    |
//! | municipality match              | +20    |
//! | municipality divergence         | −40    |
//! | CEP match                       | +10    |
//! | not a partial match             | +10    |
//!
//! A coordinate known to be outside the region scores exactly 0.
//! The weights decide which stored units cross the 60/80 display thresholds,
//! so they must not change without re-scoring every unit.

use serde::{Deserialize, Serialize};

use crate::types::{PrecisionTier, UnitStatus, ValidationFlags};

pub const EXCELLENT_THRESHOLD: u8 = 80;
pub const ACCEPTABLE_THRESHOLD: u8 = 60;

/// Display grouping for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// `score >= 80`
    Excellent,
    /// `60 <= score < 80`
    Acceptable,
    /// `score < 60`
    NeedsReview,
}

impl ScoreBand {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Acceptable => "acceptable",
            ScoreBand::NeedsReview => "needs review",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Compute the 0–100 confidence score for a geocoded unit.
#[must_use]
pub fn compute_score(precision: Option<PrecisionTier>, flags: &ValidationFlags) -> u8 {
    let mut score: i32 = match precision {
        Some(PrecisionTier::Rooftop) => 60,
        Some(PrecisionTier::RangeInterpolated) => 30,
        Some(PrecisionTier::GeometricCenter | PrecisionTier::Approximate) => 10,
        None => 0,
    };

    match flags.municipality_match {
        Some(true) => score += 20,
        Some(false) => score -= 40,
        None => {}
    }

    if flags.cep_match == Some(true) {
        score += 10;
    }

    if flags.partial_match != Some(true) {
        score += 10;
    }

    if flags.inside_region == Some(false) {
        score = 0;
    }

    // Clamped to [0, 100] so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = score.clamp(0, 100) as u8;
    clamped
}

#[must_use]
pub fn score_band(score: u8) -> ScoreBand {
    if score >= EXCELLENT_THRESHOLD {
        ScoreBand::Excellent
    } else if score >= ACCEPTABLE_THRESHOLD {
        ScoreBand::Acceptable
    } else {
        ScoreBand::NeedsReview
    }
}

/// Status shown next to a unit, derived from its score and flags.
#[must_use]
pub fn derive_status(score: u8, flags: &ValidationFlags) -> UnitStatus {
    if flags.inside_region == Some(false) {
        UnitStatus::OutsideRegion
    } else if flags.municipality_match == Some(false) {
        UnitStatus::MunicipalityMismatch
    } else if score_band(score) == ScoreBand::NeedsReview {
        UnitStatus::Review
    } else {
        UnitStatus::Ok
    }
}
