use crate::domain::pronunciation::VoiceSettings;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a name or short phrase with the given voice
    ///
    /// Returns the encoded audio (MP3 unless the provider is configured otherwise)
    ///
    /// # Errors
    /// Returns the provider's failure message if synthesis fails or the provider is unavailable
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>, String>;
}
