use super::enrichment_repository::EthnicityRepository;
use crate::domain::enrichment::{CountryProbability, Lookup};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const NATIONALIZE_API_URL: &str = "https://api.nationalize.io";

#[derive(Debug, Deserialize)]
struct NationalizeResponse {
    #[serde(default)]
    country: Vec<NationalizeCountry>,
}

#[derive(Debug, Deserialize)]
struct NationalizeCountry {
    country_id: String,
    probability: f64,
}

/// nationalize.io implementation of the ethnicity vendor
pub struct NationalizeRepository {
    http_client: reqwest::Client,
    base_url: String,
}

impl NationalizeRepository {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: NATIONALIZE_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, name: &str) -> Result<NationalizeResponse, String> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(|e| format!("nationalize.io request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("nationalize.io returned {}", response.status()));
        }

        response
            .json::<NationalizeResponse>()
            .await
            .map_err(|e| format!("Failed to parse nationalize.io response: {}", e))
    }
}

#[async_trait]
impl EthnicityRepository for NationalizeRepository {
    async fn country_probabilities(&self, name: &str) -> Lookup<Vec<CountryProbability>> {
        match self.fetch(name).await {
            Ok(response) => Lookup::Found(to_percentages(response.country)),
            Err(e) => {
                tracing::warn!(vendor = "nationalize", error = %e, "Ethnicity lookup unavailable");
                Lookup::Unavailable(e)
            }
        }
    }
}

fn to_percentages(countries: Vec<NationalizeCountry>) -> Vec<CountryProbability> {
    let mut countries: Vec<CountryProbability> = countries
        .into_iter()
        .map(|c| CountryProbability {
            country: c.country_id,
            probability: (c.probability * 10_000.0).round() / 100.0,
        })
        .collect();
    countries.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    countries
}
