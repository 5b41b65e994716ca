use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::pronunciation::{
        PronounceRequest, PronounceResponse, PronunciationService, PronunciationServiceApi,
        UploadResponse,
    },
    error::{AppError, AppResult},
};

pub struct PronunciationController {
    pronunciation_service: Arc<PronunciationService>,
}

impl PronunciationController {
    pub fn new(pronunciation_service: Arc<PronunciationService>) -> Self {
        Self {
            pronunciation_service,
        }
    }

    /// POST /api/pronounce - Generate the pronunciation of one name
    pub async fn pronounce(
        State(controller): State<Arc<PronunciationController>>,
        Json(request): Json<PronounceRequest>,
    ) -> AppResult<Json<PronounceResponse>> {
        let response = controller
            .pronunciation_service
            .pronounce(request.name)
            .await?;
        Ok(Json(response))
    }

    /// POST /api/upload - Pronounce every name of an uploaded CSV file
    pub async fn upload(
        State(controller): State<Arc<PronunciationController>>,
        mut multipart: Multipart,
    ) -> AppResult<Json<UploadResponse>> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut has_header = false;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to parse multipart form: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read file field: {}", e))
                    })?;
                    file = Some((filename, bytes.to_vec()));
                }
                "has_header" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read has_header field: {}", e))
                    })?;
                    has_header = matches!(
                        value.trim().to_lowercase().as_str(),
                        "true" | "1" | "y" | "yes"
                    );
                }
                _ => {}
            }
        }

        let (filename, contents) =
            file.ok_or_else(|| AppError::BadRequest("Invalid file format".to_string()))?;

        let response = controller
            .pronunciation_service
            .pronounce_csv(filename, contents, has_header)
            .await?;
        Ok(Json(response))
    }
}
