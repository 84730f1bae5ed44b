use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Wayfarer backend.
///
/// Loaded from `~/.wayfarer/config.toml` by default. Each section
/// corresponds to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WayfarerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for WayfarerConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            chat: ChatConfig::default(),
            model: ModelConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl WayfarerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WayfarerConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Port the HTTP API listens on.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            port: 3030,
            log_level: "info".to_string(),
        }
    }
}

/// Chat turn processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum conversation entries kept in the window sent to the model.
    pub history_window: usize,
    /// Maximum user message length in characters.
    pub max_message_length: usize,
    /// Days assumed for an itinerary when the conversation never names a count.
    pub default_trip_days: u32,
    /// How far in the future to place a trip when the user gives a length
    /// but no dates.
    pub booking_horizon_days: i64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            max_message_length: 2000,
            default_trip_days: 3,
            booking_horizon_days: 30,
        }
    }
}

/// Model completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Chat-completion endpoint URL (OpenAI-compatible).
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "WAYFARER_MODEL_API_KEY".to_string(),
            timeout_secs: 30,
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// External data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Geocoding search endpoint (Nominatim-compatible).
    pub geocoding_url: String,
    /// Weather forecast endpoint (Open-Meteo-compatible).
    pub weather_url: String,
    /// Flight offer search endpoint.
    pub flight_url: String,
    /// Hotel offer search endpoint.
    pub hotel_url: String,
    /// Per-request timeout in seconds for all providers.
    pub timeout_secs: u64,
    /// Fabricate schema-valid offers when a provider fails.
    pub synthetic_fallback: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://nominatim.openstreetmap.org/search".to_string(),
            weather_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            flight_url: "https://api.wayfarer.example/flights".to_string(),
            hotel_url: "https://api.wayfarer.example/hotels".to_string(),
            timeout_secs: 10,
            synthetic_fallback: true,
        }
    }
}
