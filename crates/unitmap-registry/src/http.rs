use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::RegistryError;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, RegistryError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("unitmap/0.1 (registry-lookup)")
        .build()?;
    Ok(client)
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, RegistryError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| RegistryError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn join(base_url: &Url, path: &str) -> Result<Url, RegistryError> {
    base_url
        .join(path)
        .map_err(|e| RegistryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

pub(crate) async fn get_json<T>(client: &Client, url: Url) -> Result<T, RegistryError>
where
    T: serde::de::DeserializeOwned,
{
    let context = url.to_string();
    let response = client.get(url).send().await?;
    let response = response.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| RegistryError::Deserialize { context, source: e })
}
