use super::enrichment_repository::OriginRepository;
use crate::domain::enrichment::Lookup;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const NAMSOR_API_URL: &str = "https://v2.namsor.com/NamSorAPIv2/api2/json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamsorOriginResponse {
    country_origin: Option<String>,
}

/// NamSor implementation of the origin vendor
pub struct NamsorOriginRepository {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NamsorOriginRepository {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: NAMSOR_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn origin_url(&self, name: &str) -> String {
        let (first, last) = split_name(name);
        format!(
            "{}/origin/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(first),
            urlencoding::encode(last)
        )
    }

    async fn fetch(&self, name: &str) -> Result<Option<String>, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "NAMSOR_API_KEY is not configured".to_string())?;

        let response = self
            .http_client
            .get(self.origin_url(name))
            .header("X-API-KEY", api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| format!("NamSor request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("NamSor returned {}", response.status()));
        }

        let body = response
            .json::<NamsorOriginResponse>()
            .await
            .map_err(|e| format!("Failed to parse NamSor response: {}", e))?;

        Ok(body.country_origin)
    }
}

#[async_trait]
impl OriginRepository for NamsorOriginRepository {
    async fn origin(&self, name: &str) -> Lookup<String> {
        match self.fetch(name).await {
            Ok(Some(origin)) if !origin.trim().is_empty() => Lookup::Found(origin),
            Ok(_) => Lookup::Unavailable("no origin returned".to_string()),
            Err(e) => {
                tracing::warn!(vendor = "namsor", error = %e, "Origin lookup unavailable");
                Lookup::Unavailable(e)
            }
        }
    }
}

/// First token is the given name, the rest the surname. A single token is used for both.
fn split_name(name: &str) -> (&str, &str) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (name, name),
    }
}
