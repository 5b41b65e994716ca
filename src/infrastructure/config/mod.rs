use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
    // ElevenLabs
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: String,
    pub elevenlabs_model_id: String,
    pub elevenlabs_output_format: String,
    // Enrichment vendors
    pub namsor_api_key: Option<String>,
    pub enrichment_timeout_secs: u64,
    // Local file storage
    pub audio_output_dir: PathBuf,
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub enabled: bool,
    pub run_migrations: bool,
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080").parse()?,
            environment: match var("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database: DatabaseConfig {
                enabled: parse_flag(lookup("DB_ENABLED"), true),
                run_migrations: parse_flag(lookup("DB_RUN_MIGRATIONS"), true),
                url: optional("DATABASE_URL"),
                host: var("DB_HOST", "localhost"),
                port: var("DB_PORT", "5432").parse()?,
                name: var("DB_NAME", "name_pronunciation"),
                user: var("DB_USER", "postgres"),
                password: var("DB_PASSWORD", "password"),
            },
            elevenlabs_api_key: optional("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: var("ELEVENLABS_VOICE_ID", "JBFqnCBsd6RMkjVDRZzb"),
            elevenlabs_model_id: var("ELEVENLABS_MODEL_ID", "eleven_multilingual_v2"),
            elevenlabs_output_format: var("ELEVENLABS_OUTPUT_FORMAT", "mp3_44100_128"),
            namsor_api_key: optional("NAMSOR_API_KEY"),
            enrichment_timeout_secs: var("ENRICHMENT_TIMEOUT_SECS", "5").parse()?,
            audio_output_dir: PathBuf::from(var("AUDIO_OUTPUT_DIR", "static/audio")),
            upload_dir: PathBuf::from(var("UPLOAD_DIR", "static/uploads")),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }
}

impl DatabaseConfig {
    /// Connection string, preferring an explicit `DATABASE_URL`.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        None => default,
    }
}
