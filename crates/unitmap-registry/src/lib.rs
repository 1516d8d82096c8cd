//! Company-registry lookup by CNPJ.
//!
//! Two providers are consulted in priority order (`BrasilAPI`, then
//! `ReceitaWS`); the second is used only when the first fails.

mod brasilapi;
pub mod business_id;
mod error;
mod http;
mod lookup;
mod provider;
mod receitaws;
mod types;

pub use brasilapi::BrasilApiClient;
pub use business_id::{format_business_id, normalize_business_id, parse_business_id_list};
pub use error::RegistryError;
pub use lookup::RegistryLookup;
pub use provider::RegistryProvider;
pub use receitaws::ReceitaWsClient;
pub use types::{CompanyRecord, UNKNOWN_ACTIVITY};
