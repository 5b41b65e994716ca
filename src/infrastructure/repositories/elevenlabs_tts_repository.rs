use super::tts_repository::TtsRepository;
use crate::domain::pronunciation::VoiceSettings;
use async_trait::async_trait;
use serde::Serialize;

const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs implementation of TTS repository
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    output_format: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(api_key: Option<String>, output_format: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            base_url: ELEVENLABS_API_URL.to_string(),
            output_format,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn speech_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{}?output_format={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(voice_id),
            urlencoding::encode(&self.output_format)
        )
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "ELEVENLABS_API_KEY is not configured".to_string())?;

        tracing::info!(
            voice_id = %voice.voice_id,
            model_id = %voice.model_id,
            text_length = text.len(),
            "Calling ElevenLabs text-to-speech API"
        );

        let response = self
            .http_client
            .post(self.speech_url(&voice.voice_id))
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
            .json(&SpeechRequest {
                text,
                model_id: &voice.model_id,
            })
            .send()
            .await
            .map_err(|e| format!("ElevenLabs request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                error = %error_text,
                "ElevenLabs API returned an error"
            );
            return Err(format!("ElevenLabs API error ({}): {}", status, error_text));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read ElevenLabs audio: {}", e))?;

        tracing::info!(audio_size = audio.len(), "ElevenLabs synthesis completed");

        Ok(audio.to_vec())
    }
}
