use name_pronouncer::controllers::{
    enrichment::EnrichmentController, operations::OperationsController,
    pronunciation::PronunciationController,
};
use name_pronouncer::domain::audit::RequestLogger;
use name_pronouncer::domain::enrichment::EnrichmentService;
use name_pronouncer::domain::pronunciation::{PronunciationService, VoiceSettings};
use name_pronouncer::infrastructure::config::{Config, LogFormat};
use name_pronouncer::infrastructure::db::AuditDatabase;
use name_pronouncer::infrastructure::http::{create_router, start_http_server};
use name_pronouncer::infrastructure::repositories::{
    AuditLogRepository, ElevenLabsTtsRepository, NamsorOriginRepository, NationalizeRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting name pronouncer on {}:{}",
        config.host,
        config.port
    );

    if config.elevenlabs_api_key.is_none() {
        tracing::warn!("ELEVENLABS_API_KEY not set, every synthesis request will fail");
    }
    if config.namsor_api_key.is_none() {
        tracing::warn!("NAMSOR_API_KEY not set, origin lookups will be unavailable");
    }

    tokio::fs::create_dir_all(&config.audio_output_dir).await?;
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Audit store: connection is attempted once, failure means running unlogged
    let audit_db = Arc::new(AuditDatabase::new(&config.database));
    let audit_store = Arc::new(AuditLogRepository::new(audit_db.clone()));
    if audit_db.is_enabled() {
        let connected = audit_store.health_check().await;
        tracing::info!(connected = connected, state = ?audit_db.state(), "Audit store initialized");
    } else {
        tracing::info!("Audit logging disabled by configuration");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate vendor repositories
    tracing::info!("Instantiating repositories...");
    let tts_repo = Arc::new(ElevenLabsTtsRepository::new(
        config.elevenlabs_api_key.clone(),
        config.elevenlabs_output_format.clone(),
    ));
    let ethnicity_repo = Arc::new(NationalizeRepository::new(config.enrichment_timeout()));
    let origin_repo = Arc::new(NamsorOriginRepository::new(
        config.namsor_api_key.clone(),
        config.enrichment_timeout(),
    ));

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let request_logger = Arc::new(RequestLogger::new(audit_store.clone()));
    let pronunciation_service = Arc::new(PronunciationService::new(
        tts_repo,
        request_logger,
        VoiceSettings {
            voice_id: config.elevenlabs_voice_id.clone(),
            model_id: config.elevenlabs_model_id.clone(),
        },
        config.audio_output_dir.clone(),
        config.upload_dir.clone(),
    ));
    let enrichment_service = Arc::new(EnrichmentService::new(ethnicity_repo, origin_repo));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let pronunciation_controller = Arc::new(PronunciationController::new(pronunciation_service));
    let enrichment_controller = Arc::new(EnrichmentController::new(enrichment_service));
    let operations_controller = Arc::new(OperationsController::new(audit_store.clone()));

    let app = create_router(
        audit_store,
        &config.audio_output_dir,
        pronunciation_controller,
        enrichment_controller,
        operations_controller,
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "name_pronouncer=debug,tower_http=debug"
    } else {
        "name_pronouncer=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
