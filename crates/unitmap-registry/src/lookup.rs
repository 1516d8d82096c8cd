//! Registry lookup with ordered provider fallback and throttled batches.

use std::time::Duration;

use unitmap_core::AppConfig;

use crate::brasilapi::BrasilApiClient;
use crate::business_id::normalize_business_id;
use crate::error::RegistryError;
use crate::provider::RegistryProvider;
use crate::receitaws::ReceitaWsClient;
use crate::types::CompanyRecord;

pub struct RegistryLookup {
    providers: Vec<Box<dyn RegistryProvider>>,
}

impl RegistryLookup {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn RegistryProvider>>) -> Self {
        Self { providers }
    }

    /// `BrasilAPI` first, `ReceitaWS` second.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        Ok(Self::new(vec![
            Box::new(BrasilApiClient::new(config.http_timeout_secs)?),
            Box::new(ReceitaWsClient::new(config.http_timeout_secs)?),
        ]))
    }

    /// Look up one business id. Provider failures are logged and fall
    /// through to the next provider; `None` means every provider failed.
    pub async fn lookup(&self, business_id: &str) -> Option<CompanyRecord> {
        let id = normalize_business_id(business_id);
        if id.is_empty() {
            tracing::warn!(business_id, "business id has no digits");
            return None;
        }

        for provider in &self.providers {
            let name = provider.name();
            tracing::debug!(provider = name, business_id = %id, "looking up business id");
            match provider.fetch(&id).await {
                Ok(record) => {
                    tracing::info!(
                        provider = name,
                        business_id = %id,
                        legal_name = %record.legal_name,
                        "registry record found"
                    );
                    return Some(record);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = name,
                        business_id = %id,
                        error = %e,
                        "registry lookup failed"
                    );
                }
            }
        }

        tracing::warn!(business_id = %id, "all registry providers failed");
        None
    }

    /// Look up `ids` one at a time with `delay` between requests.
    ///
    /// The output is aligned with the input. `on_progress` is called after
    /// each id with `(processed, total, record)`.
    pub async fn lookup_many<F>(
        &self,
        ids: &[String],
        delay: Duration,
        mut on_progress: F,
    ) -> Vec<Option<CompanyRecord>>
    where
        F: FnMut(usize, usize, Option<&CompanyRecord>),
    {
        let total = ids.len();
        let mut records = Vec::with_capacity(total);

        for (index, id) in ids.iter().enumerate() {
            let record = self.lookup(id).await;
            on_progress(index + 1, total, record.as_ref());
            records.push(record);

            if index + 1 < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        records
    }
}
