pub mod audit_log_repository;
pub mod elevenlabs_tts_repository;
pub mod enrichment_repository;
pub mod namsor_origin_repository;
pub mod nationalize_repository;
pub mod tts_repository;

pub use audit_log_repository::AuditLogRepository;
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use enrichment_repository::{EthnicityRepository, OriginRepository};
pub use namsor_origin_repository::NamsorOriginRepository;
pub use nationalize_repository::NationalizeRepository;
pub use tts_repository::TtsRepository;
