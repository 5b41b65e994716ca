pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use request_id::{request_id_middleware, RequestId};

use crate::controllers::{
    enrichment::EnrichmentController, health, operations::OperationsController,
    pronunciation::PronunciationController,
};
use crate::domain::pronunciation::service::AUDIO_URL_PREFIX;
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::AuditLogRepository;

/// Build the application router with all routes configured
pub fn create_router(
    audit_store: Arc<AuditLogRepository>,
    audio_dir: &Path,
    pronunciation_controller: Arc<PronunciationController>,
    enrichment_controller: Arc<EnrichmentController>,
    operations_controller: Arc<OperationsController>,
) -> Router {
    let pronunciation_routes = Router::new()
        .route("/api/pronounce", post(PronunciationController::pronounce))
        .route("/api/upload", post(PronunciationController::upload))
        .with_state(pronunciation_controller);

    let enrichment_routes = Router::new()
        .route("/api/enrich", post(EnrichmentController::enrich))
        .with_state(enrichment_controller);

    let operations_routes = Router::new()
        .route("/api/operations", get(OperationsController::list_operations))
        .route(
            "/api/operations/single-text",
            get(OperationsController::list_single_text),
        )
        .route(
            "/api/operations/csv-uploads",
            get(OperationsController::list_csv_uploads),
        )
        .route("/api/operations/summary", get(OperationsController::summary))
        .route("/api/operations/:id", get(OperationsController::get_operation))
        .with_state(operations_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(audit_store)
        .merge(pronunciation_routes)
        .merge(enrichment_routes)
        .merge(operations_routes)
        .nest_service(AUDIO_URL_PREFIX, ServeDir::new(audio_dir))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
