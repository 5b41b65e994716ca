pub mod csv_names;
pub mod error;
pub mod file_names;
pub mod service;

pub use csv_names::{CsvNameReader, CsvNamesError};
pub use error::PronunciationError;
pub use file_names::audio_file_name;
pub use service::{PronunciationService, PronunciationServiceApi};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Voice and model the speech vendor should use
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    pub voice_id: String,
    pub model_id: String,
}

/// Whether the audit log recorded the request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Logged,
    Unlogged,
}

/// Request for POST /api/pronounce
#[derive(Debug, Serialize, Deserialize)]
pub struct PronounceRequest {
    pub name: String,
}

/// Response for POST /api/pronounce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronounceResponse {
    pub name: String,
    pub audio_url: String,
    pub status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NameAudio {
    pub name: String,
    pub audio_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailedName {
    pub name: String,
    pub reason: String,
}

/// Response for POST /api/upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub names_count: usize,
    pub audios: Vec<NameAudio>,
    pub failed: Vec<FailedName>,
    pub status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<Uuid>,
}
