//! Primary registry provider: `BrasilAPI` CNPJ endpoint.

use reqwest::{Client, Url};
use serde::Deserialize;
use unitmap_core::text::digits;
use unitmap_core::PostalAddress;

use crate::error::RegistryError;
use crate::http::{build_client, get_json, join, parse_base_url};
use crate::provider::RegistryProvider;
use crate::types::{non_empty, CompanyRecord, UNKNOWN_ACTIVITY};

const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br/";
const PROVIDER: &str = "brasilapi";

#[derive(Debug, Deserialize)]
struct Activity {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BrasilApiCompany {
    cnpj: Option<String>,
    razao_social: Option<String>,
    nome: Option<String>,
    nome_fantasia: Option<String>,
    cnae_fiscal_descricao: Option<String>,
    atividade_principal: Vec<Activity>,
    logradouro: Option<String>,
    numero: Option<String>,
    complemento: Option<String>,
    bairro: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cep: Option<String>,
    descricao_situacao_cadastral: Option<String>,
    situacao: Option<String>,
    ddd_telefone_1: Option<String>,
    correio_eletronico: Option<String>,
}

/// `"4133334444"` becomes `"(41) 33334444"`.
fn format_phone(raw: &str) -> Option<String> {
    let number = digits(raw);
    if number.len() <= 2 {
        return None;
    }
    let (ddd, rest) = number.split_at(2);
    Some(format!("({ddd}) {rest}"))
}

impl BrasilApiCompany {
    fn into_record(self, requested_id: &str) -> Result<CompanyRecord, RegistryError> {
        let legal_name = non_empty(self.razao_social)
            .or_else(|| non_empty(self.nome))
            .ok_or_else(|| RegistryError::MissingField {
                provider: PROVIDER.to_string(),
                field: "razao_social".to_string(),
            })?;

        let primary_activity = non_empty(self.cnae_fiscal_descricao)
            .or_else(|| {
                self.atividade_principal
                    .into_iter()
                    .find_map(|a| non_empty(a.text))
            })
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
            trade_name: non_empty(self.nome_fantasia),
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
            registration_status: non_empty(self.descricao_situacao_cadastral)
                .or_else(|| non_empty(self.situacao)),
            phone: self.ddd_telefone_1.as_deref().and_then(format_phone),
            email: non_empty(self.correio_eletronico),
        })
    }
}

pub struct BrasilApiClient {
    client: Client,
    base_url: Url,
}

impl BrasilApiClient {
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
impl RegistryProvider for BrasilApiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, business_id: &str) -> Result<CompanyRecord, RegistryError> {
        let url = join(&self.base_url, &format!("api/cnpj/v1/{business_id}"))?;
        let body: BrasilApiCompany = get_json(&self.client, url).await?;
        body.into_record(business_id)
    }
}
