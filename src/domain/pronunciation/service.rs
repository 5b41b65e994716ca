use super::error::PronunciationError;
use super::file_names::{audio_file_name, is_csv_file_name, upload_basename};
use super::{
    CsvNameReader, FailedName, LogStatus, NameAudio, PronounceResponse, UploadResponse,
    VoiceSettings,
};
use crate::domain::audit::{LogFailure, RequestLogger};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// URL prefix under which the audio directory is served
pub const AUDIO_URL_PREFIX: &str = "/static/audio";

pub struct PronunciationService {
    tts_repo: Arc<dyn TtsRepository>,
    logger: Arc<RequestLogger>,
    voice: VoiceSettings,
    audio_dir: PathBuf,
    upload_dir: PathBuf,
}

impl PronunciationService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        logger: Arc<RequestLogger>,
        voice: VoiceSettings,
        audio_dir: PathBuf,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            tts_repo,
            logger,
            voice,
            audio_dir,
            upload_dir,
        }
    }
}

#[async_trait]
pub trait PronunciationServiceApi: Send + Sync {
    /// Generate the pronunciation audio of one name and log the request
    ///
    /// A synthesis failure fails the request; a logging failure only
    /// marks the response as `unlogged`.
    async fn pronounce(&self, name: String) -> Result<PronounceResponse, PronunciationError>;

    /// Save an uploaded CSV, log its names, then pronounce them one by one
    ///
    /// Names whose synthesis fails are reported in `failed` and skipped.
    async fn pronounce_csv(
        &self,
        filename: String,
        contents: Vec<u8>,
        has_header: bool,
    ) -> Result<UploadResponse, PronunciationError>;
}

#[async_trait]
impl PronunciationServiceApi for PronunciationService {
    async fn pronounce(&self, name: String) -> Result<PronounceResponse, PronunciationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(PronunciationError::Invalid("No name provided".to_string()));
        }

        tracing::info!(name = %name, "Pronunciation request");

        let audio = self.synthesize_to_file(&name).await?;
        let (status, operation_id) = log_status(self.logger.log_single_text(&name).await);

        Ok(PronounceResponse {
            name,
            audio_url: audio.audio_url,
            status,
            operation_id,
        })
    }

    async fn pronounce_csv(
        &self,
        filename: String,
        contents: Vec<u8>,
        has_header: bool,
    ) -> Result<UploadResponse, PronunciationError> {
        let filename = upload_basename(&filename)
            .filter(|name| is_csv_file_name(name))
            .ok_or_else(|| PronunciationError::Invalid("Invalid file format".to_string()))?;

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::write(self.upload_dir.join(&filename), &contents).await?;

        let names = CsvNameReader::new(has_header)
            .read_names(&contents)
            .map_err(|e| PronunciationError::Invalid(format!("Could not read CSV file: {}", e)))?;

        tracing::info!(
            filename = %filename,
            names_count = names.len(),
            has_header = has_header,
            "CSV upload parsed"
        );

        let (status, operation_id) =
            log_status(self.logger.log_csv_upload(&filename, &names).await);

        let mut audios = Vec::with_capacity(names.len());
        let mut failed = Vec::new();
        for (i, name) in names.iter().enumerate() {
            tracing::debug!(position = i + 1, total = names.len(), name = %name, "Processing name");
            match self.synthesize_to_file(name).await {
                Ok(audio) => audios.push(audio),
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "Skipping name that could not be pronounced");
                    failed.push(FailedName {
                        name: name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if audios.is_empty() {
            tracing::warn!(filename = %filename, "No audio generated for CSV upload");
        }

        Ok(UploadResponse {
            filename,
            names_count: names.len(),
            audios,
            failed,
            status,
            operation_id,
        })
    }
}

impl PronunciationService {
    async fn synthesize_to_file(&self, name: &str) -> Result<NameAudio, PronunciationError> {
        let audio = self
            .tts_repo
            .synthesize(name, &self.voice)
            .await
            .map_err(PronunciationError::SynthesisFailed)?;

        let file_name = audio_file_name(name);
        tokio::fs::create_dir_all(&self.audio_dir).await?;
        tokio::fs::write(self.audio_dir.join(&file_name), &audio).await?;

        tracing::info!(name = %name, file = %file_name, audio_size = audio.len(), "Pronunciation audio saved");

        Ok(NameAudio {
            name: name.to_string(),
            audio_url: format!("{}/{}", AUDIO_URL_PREFIX, urlencoding::encode(&file_name)),
        })
    }
}

fn log_status(result: Result<Uuid, LogFailure>) -> (LogStatus, Option<Uuid>) {
    match result {
        Ok(id) => (LogStatus::Logged, Some(id)),
        Err(_) => (LogStatus::Unlogged, None),
    }
}
