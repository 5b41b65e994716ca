use async_trait::async_trait;
use name_pronouncer::domain::enrichment::{CountryProbability, Lookup};
use name_pronouncer::domain::pronunciation::VoiceSettings;
use name_pronouncer::infrastructure::repositories::{
    EthnicityRepository, OriginRepository, TtsRepository,
};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Name the stub speech vendor always rejects
pub const UNPRONOUNCEABLE: &str = "Unpronounceable";

pub fn mock_audio_bytes() -> Vec<u8> {
    // MP3 frame header followed by padding
    vec![0xFF, 0xFB, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Speech vendor stand-in that records every text it was asked for
#[derive(Default)]
pub struct StubTtsRepository {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl TtsRepository for StubTtsRepository {
    async fn synthesize(&self, text: &str, _voice: &VoiceSettings) -> Result<Vec<u8>, String> {
        self.calls.lock().push(text.to_string());
        if text == UNPRONOUNCEABLE {
            return Err("voice_not_found: the voice cannot render this text".to_string());
        }
        Ok(mock_audio_bytes())
    }
}

/// Ethnicity vendor answering from a fixed table; unknown names are unavailable
#[derive(Default)]
pub struct StubEthnicityRepository {
    pub answers: HashMap<String, Vec<(String, f64)>>,
}

impl StubEthnicityRepository {
    pub fn with(mut self, name: &str, countries: &[(&str, f64)]) -> Self {
        self.answers.insert(
            name.to_string(),
            countries.iter().map(|(c, p)| (c.to_string(), *p)).collect(),
        );
        self
    }
}

#[async_trait]
impl EthnicityRepository for StubEthnicityRepository {
    async fn country_probabilities(&self, name: &str) -> Lookup<Vec<CountryProbability>> {
        match self.answers.get(name) {
            Some(countries) => Lookup::Found(
                countries
                    .iter()
                    .map(|(country, probability)| CountryProbability {
                        country: country.clone(),
                        probability: *probability,
                    })
                    .collect(),
            ),
            None => Lookup::Unavailable("request timed out".to_string()),
        }
    }
}

/// Origin vendor answering from a fixed table; unknown names get no answer
#[derive(Default)]
pub struct StubOriginRepository {
    pub answers: HashMap<String, String>,
}

impl StubOriginRepository {
    pub fn with(mut self, name: &str, origin: &str) -> Self {
        self.answers.insert(name.to_string(), origin.to_string());
        self
    }
}

#[async_trait]
impl OriginRepository for StubOriginRepository {
    async fn origin(&self, name: &str) -> Lookup<String> {
        match self.answers.get(name) {
            Some(origin) => Lookup::Found(origin.clone()),
            None => Lookup::Unavailable("no origin returned".to_string()),
        }
    }
}
