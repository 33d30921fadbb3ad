//! Application configuration. Backend credentials and tunables.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend API key. Read from PO_CLASSIFY_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Backend endpoint. Defaults to OpenAI. Read from PO_CLASSIFY_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gpt-4o-mini". Read from PO_CLASSIFY_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Max wall-clock seconds per backend call. Read from PO_CLASSIFY_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,

    /// Sampling temperature (0–1). Read from PO_CLASSIFY_AI_TEMPERATURE.
    #[serde(default)]
    pub ai_temperature: Option<f32>,

    /// Additional attempts after a transient backend failure. Read from
    /// PO_CLASSIFY_AI_MAX_RETRIES.
    #[serde(default)]
    pub ai_max_retries: Option<u32>,

    /// Base backoff between retries in ms. Read from PO_CLASSIFY_AI_RETRY_BACKOFF_MS.
    #[serde(default)]
    pub ai_retry_backoff_ms: Option<u64>,

    /// Path to a taxonomy JSON file overriding the embedded catalog. Read
    /// from PO_CLASSIFY_TAXONOMY_PATH.
    #[serde(default)]
    pub taxonomy_path: Option<String>,

    /// Directory for CSV exports. Defaults to ./exports. Read from
    /// PO_CLASSIFY_EXPORT_DIR.
    #[serde(default)]
    pub export_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        // try_parsing so numeric/float tunables deserialize from env strings
        c = c.add_source(config::Environment::with_prefix("PO_CLASSIFY").try_parsing(true));
        if let Ok(path) = std::env::var("PO_CLASSIFY_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the backend API key if configured.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("PO_CLASSIFY_AI_API_KEY").ok())
    }

    /// Returns the backend endpoint. Defaults to the OpenAI chat-completions URL.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .or_else(|| std::env::var("PO_CLASSIFY_AI_API_URL").ok())
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .or_else(|| std::env::var("PO_CLASSIFY_AI_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Returns the per-call timeout. Defaults to 30 seconds.
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Returns the sampling temperature clamped to 0–1. Defaults to 0.2.
    pub fn temperature_or_default(&self) -> f32 {
        self.ai_temperature
            .unwrap_or(DEFAULT_TEMPERATURE)
            .clamp(0.0, 1.0)
    }

    /// Returns the retry bound (additional attempts). Defaults to 2.
    pub fn max_retries_or_default(&self) -> u32 {
        self.ai_max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    /// Returns the base retry backoff. Defaults to 500 ms.
    pub fn retry_backoff_or_default(&self) -> Duration {
        Duration::from_millis(self.ai_retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS))
    }

    /// Returns the taxonomy override path if configured.
    pub fn taxonomy_path(&self) -> Option<PathBuf> {
        self.taxonomy_path.as_deref().map(PathBuf::from)
    }

    /// Returns the CSV export directory. Defaults to ./exports.
    pub fn export_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.export_dir.as_deref().unwrap_or("./exports"))
    }

    /// Returns true if a real backend is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }
}
