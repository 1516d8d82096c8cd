use serde::{Deserialize, Serialize};
use unitmap_core::PostalAddress;

/// Value used when a registry record lists no primary activity.
pub const UNKNOWN_ACTIVITY: &str = "Não informado";

/// A company as returned by a business registry, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Digits only.
    pub business_id: String,
    pub legal_name: String,
    pub trade_name: Option<String>,
    pub primary_activity: String,
    pub address: PostalAddress,
    pub registration_status: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CompanyRecord {
    #[must_use]
    pub fn full_address(&self) -> String {
        self.address.full_address()
    }
}

/// Trim, and treat blank strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
