//! CNPJ text handling. Check-digit validation is not performed.

use std::collections::HashSet;

use unitmap_core::text::digits;

pub const BUSINESS_ID_LEN: usize = 14;

/// Strip everything but digits.
#[must_use]
pub fn normalize_business_id(text: &str) -> String {
    digits(text)
}

/// Render a 14-digit id as `00.000.000/0000-00`; other input is returned unchanged.
#[must_use]
pub fn format_business_id(text: &str) -> String {
    let id = normalize_business_id(text);
    if id.len() != BUSINESS_ID_LEN {
        return text.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &id[0..2],
        &id[2..5],
        &id[5..8],
        &id[8..12],
        &id[12..14]
    )
}

/// One id per line. Ids are normalized, kept only when 14 digits long, and
/// deduplicated keeping first-seen order.
#[must_use]
pub fn parse_business_id_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(normalize_business_id)
        .filter(|id| id.len() == BUSINESS_ID_LEN)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
