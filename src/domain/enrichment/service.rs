use super::error::EnrichmentError;
use super::model::{resolve_origin, EnrichmentResult, SourceStatus};
use crate::infrastructure::repositories::{EthnicityRepository, OriginRepository};
use async_trait::async_trait;
use std::sync::Arc;

pub struct EnrichmentService {
    ethnicity_repo: Arc<dyn EthnicityRepository>,
    origin_repo: Arc<dyn OriginRepository>,
}

impl EnrichmentService {
    pub fn new(
        ethnicity_repo: Arc<dyn EthnicityRepository>,
        origin_repo: Arc<dyn OriginRepository>,
    ) -> Self {
        Self {
            ethnicity_repo,
            origin_repo,
        }
    }
}

#[async_trait]
pub trait EnrichmentServiceApi: Send + Sync {
    /// Look up the origin and country probabilities of a name
    ///
    /// Each vendor is best-effort: whichever answers contributes, and the
    /// result says which sources were unavailable.
    async fn enrich(&self, name: String) -> Result<EnrichmentResult, EnrichmentError>;
}

#[async_trait]
impl EnrichmentServiceApi for EnrichmentService {
    async fn enrich(&self, name: String) -> Result<EnrichmentResult, EnrichmentError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(EnrichmentError::Invalid("No name provided".to_string()));
        }

        let ethnicity = self.ethnicity_repo.country_probabilities(&name).await;
        let origin = self.origin_repo.origin(&name).await;

        let sources = SourceStatus {
            origin: (&origin).into(),
            ethnicity: (&ethnicity).into(),
        };
        let resolved = resolve_origin(&origin, &ethnicity);

        tracing::info!(
            name = %name,
            origin = %resolved,
            origin_source = ?sources.origin,
            ethnicity_source = ?sources.ethnicity,
            "Name enriched"
        );

        Ok(EnrichmentResult {
            name,
            origin: resolved,
            ethnicity: ethnicity.found().cloned().unwrap_or_default(),
            sources,
        })
    }
}
