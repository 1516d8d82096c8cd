//! Address admission filter and per-provider query normalization.

use std::sync::LazyLock;

use regex::Regex;
use unitmap_core::text::{fold, tokens};

use crate::gazetteer::is_known_municipality;

/// Street-type keywords, matched against accent-folded lower-case text.
static STREET_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(rua|avenida|av|alameda|travessa|praca|estrada|rodovia|br|pr)\b")
        .expect("valid regex")
});

const REGION_TOKENS: &[&str] = &["parana", "pr"];
const COUNTRY_TOKENS: &[&str] = &["brasil", "brazil"];
/// Minimum length of a bare place name.
const MIN_PLACE_NAME_CHARS: usize = 3;
/// A street address must be strictly longer than this.
const MIN_STREET_ADDRESS_CHARS: usize = 20;

fn has_any_token(words: &[String], wanted: &[&str]) -> bool {
    words.iter().any(|w| wanted.contains(&w.as_str()))
}

/// Whether `text` looks like something worth sending to a geocoder.
///
/// Admitted when it names the region or country and is at least three
/// characters long, when it is the bare name of a known municipality, or when
/// it contains a street-type keyword and is longer than twenty characters.
#[must_use]
pub fn is_admissible(text: &str) -> bool {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    let words = tokens(trimmed);

    if words.iter().any(|w| w == "parana") || has_any_token(&words, COUNTRY_TOKENS) {
        return len >= MIN_PLACE_NAME_CHARS;
    }

    if is_known_municipality(trimmed) {
        return true;
    }

    STREET_KEYWORD.is_match(&fold(trimmed)) && len > MIN_STREET_ADDRESS_CHARS
}

/// Drop characters outside letters, digits, whitespace and `, . -`, then
/// collapse runs of whitespace.
#[must_use]
pub fn clean(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Query for the primary provider: cleaned, with the region and country
/// appended when absent.
#[must_use]
pub fn normalize_with_region(text: &str) -> String {
    let cleaned = clean(text);
    let words = tokens(&cleaned);
    if !has_any_token(&words, REGION_TOKENS) {
        format!("{cleaned}, Paraná, Brasil")
    } else if !has_any_token(&words, COUNTRY_TOKENS) {
        format!("{cleaned}, Brasil")
    } else {
        cleaned
    }
}

/// Query for the fallback providers: the address plus the country, always
/// appended.
#[must_use]
pub fn normalize_with_country(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{collapsed}, Brazil")
}

/// Target-city query: the region and country are appended unless the region
/// is already named.
#[must_use]
pub fn city_query(name: &str) -> String {
    let trimmed = name.trim();
    if tokens(trimmed).iter().any(|w| w == "parana") {
        trimmed.to_string()
    } else {
        format!("{trimmed}, Paraná, Brasil")
    }
}
