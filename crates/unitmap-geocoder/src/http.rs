use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ProviderError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Join `path` onto `base_url`, tolerating a missing or doubled trailing slash.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ProviderError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .and_then(|base| base.join(path))
        .map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

/// GET `url` and decode the body as `T`.
///
/// `context` names the call in errors; it must not contain API keys. HTTP
/// errors are stripped of their URL, which carries the key in the query.
pub(crate) async fn get_json<T>(client: &Client, url: Url, context: &str) -> Result<T, ProviderError>
where
    T: serde::de::DeserializeOwned,
{
    let response = client
        .get(url)
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;
    let response = response
        .error_for_status()
        .map_err(reqwest::Error::without_url)?;
    let body = response.text().await.map_err(reqwest::Error::without_url)?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
