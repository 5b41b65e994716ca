use crate::error::AppError;

/// Vendor failures never reach this type; they become `Lookup::Unavailable`.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("invalid input: {0}")]
    Invalid(String),
}

impl From<EnrichmentError> for AppError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::Invalid(msg) => AppError::BadRequest(msg),
        }
    }
}
