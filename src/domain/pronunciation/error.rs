use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PronunciationError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<PronunciationError> for AppError {
    fn from(err: PronunciationError) -> Self {
        match err {
            PronunciationError::Invalid(msg) => AppError::BadRequest(msg),
            PronunciationError::SynthesisFailed(msg) => AppError::ExternalService(msg),
            PronunciationError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}
