use crate::error::RegistryError;
use crate::types::CompanyRecord;

/// One business-registry backend.
#[async_trait::async_trait]
pub trait RegistryProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch the record for a normalized (digits-only) business id.
    async fn fetch(&self, business_id: &str) -> Result<CompanyRecord, RegistryError>;
}
