//! Secondary registry provider: `ReceitaWS`.
//!
//! Errors arrive as HTTP 200 with `"status": "ERROR"` and a `message`.

use reqwest::{Client, Url};
use serde::Deserialize;
use unitmap_core::text::digits;
use unitmap_core::PostalAddress;

use crate::error::RegistryError;
use crate::http::{build_client, get_json, join, parse_base_url};
use crate::provider::RegistryProvider;
use crate::types::{non_empty, CompanyRecord, UNKNOWN_ACTIVITY};

const DEFAULT_BASE_URL: &str = "https://www.receitaws.com.br/";
const PROVIDER: &str = "receitaws";

#[derive(Debug, Deserialize)]
struct Activity {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReceitaWsCompany {
    status: Option<String>,
    message: Option<String>,
    cnpj: Option<String>,
    nome: Option<String>,
    fantasia: Option<String>,
    atividade_principal: Vec<Activity>,
    logradouro: Option<String>,
    numero: Option<String>,
    complemento: Option<String>,
    bairro: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cep: Option<String>,
    situacao: Option<String>,
    telefone: Option<String>,
    email: Option<String>,
}

impl ReceitaWsCompany {
    fn into_record(self, requested_id: &str) -> Result<CompanyRecord, RegistryError> {
        if self.status.as_deref() == Some("ERROR") {
            return Err(RegistryError::Api {
                provider: PROVIDER.to_string(),
                message: self
                    .message
                    .unwrap_or_else(|| "unspecified error".to_string()),
            });
        }

        let legal_name = non_empty(self.nome).ok_or_else(|| RegistryError::MissingField {
            provider: PROVIDER.to_string(),
            field: "nome".to_string(),
        })?;

        let primary_activity = self
            .atividade_principal
            .into_iter()
            .find_map(|a| non_empty(a.text))
            .unwrap_or_else(|| UNKNOWN_ACTIVITY.to_string());

        let business_id = self
            .cnpj
            .as_deref()
            .map(digits)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| requested_id.to_string());

        Ok(CompanyRecord {
            business_id,
            legal_name,
            trade_name: non_empty(self.fantasia),
            primary_activity,
            address: PostalAddress {
                street: non_empty(self.logradouro).unwrap_or_default(),
                number: non_empty(self.numero).unwrap_or_default(),
                complement: non_empty(self.complemento),
                district: non_empty(self.bairro).unwrap_or_default(),
                municipality: non_empty(self.municipio).unwrap_or_default(),
                uf: non_empty(self.uf).unwrap_or_default(),
                cep: self.cep.as_deref().map(digits).unwrap_or_default(),
            },
            registration_status: non_empty(self.situacao),
            phone: non_empty(self.telefone),
            email: non_empty(self.email),
        })
    }
}

pub struct ReceitaWsClient {
    client: Client,
    base_url: Url,
}

impl ReceitaWsClient {
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, RegistryError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs)
    }

    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`RegistryError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, RegistryError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait::async_trait]
impl RegistryProvider for ReceitaWsClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, business_id: &str) -> Result<CompanyRecord, RegistryError> {
        let url = join(&self.base_url, &format!("v1/cnpj/{business_id}"))?;
        let body: ReceitaWsCompany = get_json(&self.client, url).await?;
        body.into_record(business_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_is_a_failure() {
        let body = ReceitaWsCompany {
            status: Some("ERROR".to_string()),
            message: Some("CNPJ inválido".to_string()),
            ..ReceitaWsCompany::default()
        };
        let err = body.into_record("11222333000181").unwrap_err();
        assert!(matches!(err, RegistryError::Api { ref message, .. } if message == "CNPJ inválido"));
    }

    #[test]
    fn formatted_fields_are_normalized() {
        let body = ReceitaWsCompany {
            status: Some("OK".to_string()),
            cnpj: Some("11.222.333/0001-81".to_string()),
            nome: Some("PLUMA COLCHOES LTDA".to_string()),
            fantasia: Some(String::new()),
            cep: Some("80.060-000".to_string()),
            ..ReceitaWsCompany::default()
        };
        let record = body.into_record("11222333000181").unwrap();
        assert_eq!(record.business_id, "11222333000181");
        assert_eq!(record.address.cep, "80060000");
        assert_eq!(record.trade_name, None);
        assert_eq!(record.primary_activity, UNKNOWN_ACTIVITY);
    }
}
