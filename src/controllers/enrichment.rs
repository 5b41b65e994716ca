use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::enrichment::{EnrichRequest, EnrichmentResult, EnrichmentService, EnrichmentServiceApi},
    error::AppResult,
};

pub struct EnrichmentController {
    enrichment_service: Arc<EnrichmentService>,
}

impl EnrichmentController {
    pub fn new(enrichment_service: Arc<EnrichmentService>) -> Self {
        Self { enrichment_service }
    }

    /// POST /api/enrich - Origin and country probabilities of a name
    pub async fn enrich(
        State(controller): State<Arc<EnrichmentController>>,
        Json(request): Json<EnrichRequest>,
    ) -> AppResult<Json<EnrichmentResult>> {
        let result = controller.enrichment_service.enrich(request.name).await?;
        Ok(Json(result))
    }
}
