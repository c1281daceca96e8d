//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::i18n::Language;
use crate::utils::errors::CampusEventsError;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub translation: TranslationConfig,
    pub auth: AuthConfig,
    pub i18n: I18nConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Redis configuration (real-time notification channel)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
}

/// Translation API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-attempt request timeout
    pub timeout_seconds: u64,
    /// Upper bound on one whole translate call, throttling and retries included
    pub deadline_ms: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub requests_per_second: u32,
}

/// Token signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
}

impl I18nConfig {
    /// Supported languages the translation provider is asked for
    pub fn target_languages(&self) -> Result<Vec<Language>, CampusEventsError> {
        let mut targets = Vec::new();
        for code in &self.supported_languages {
            let lang = code.parse::<Language>()?;
            if lang != Language::CANONICAL && !targets.contains(&lang) {
                targets.push(lang);
            }
        }
        Ok(targets)
    }
}

/// Event defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    pub default_total_seats: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub translation: bool,
    pub realtime: bool,
}

impl Settings {
    /// Load settings from `config.toml` and `CAMPUS__*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit configuration file
    pub fn from_file(path: &std::path::Path) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(config::Environment::with_prefix("CAMPUS").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), CampusEventsError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/campus_events".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "campus:".to_string(),
            },
            translation: TranslationConfig {
                api_url: "http://localhost:5000".to_string(),
                api_key: None,
                timeout_seconds: 5,
                deadline_ms: 5000,
                max_retries: 2,
                initial_backoff_ms: 1000,
                requests_per_second: 5,
            },
            auth: AuthConfig {
                jwt_secret: "change-me".to_string(),
                token_ttl_seconds: 7 * 24 * 3600,
            },
            i18n: I18nConfig {
                default_language: "en".to_string(),
                supported_languages: ["en", "hi", "bn", "gu", "mr", "ta"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            events: EventsConfig {
                default_total_seats: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
            features: FeaturesConfig {
                translation: true,
                realtime: true,
            },
        }
    }
}
