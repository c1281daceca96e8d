//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CampusEventsError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_translation_config(&settings.translation)?;
    validate_auth_config(&settings.auth)?;
    validate_i18n_config(&settings.i18n)?;
    validate_events_config(&settings.events)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CampusEventsError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(CampusEventsError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(CampusEventsError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(CampusEventsError::Config(
            "Database acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CampusEventsError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate translation API configuration
fn validate_translation_config(config: &super::TranslationConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(CampusEventsError::Config(
            "Translation API URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url).map_err(|e| {
        CampusEventsError::Config(format!("Invalid translation API URL: {}", e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(CampusEventsError::Config(
            "Translation timeout must be greater than 0".to_string()
        ));
    }

    if config.deadline_ms == 0 {
        return Err(CampusEventsError::Config(
            "Translation deadline must be greater than 0".to_string()
        ));
    }

    if config.requests_per_second == 0 {
        return Err(CampusEventsError::Config(
            "Translation requests per second must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate token signing configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(CampusEventsError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if config.token_ttl_seconds == 0 {
        return Err(CampusEventsError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language != "en" {
        return Err(CampusEventsError::Config(
            "Default language must be the canonical language \"en\"".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(CampusEventsError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    for code in &config.supported_languages {
        if code.parse::<crate::i18n::Language>().is_err() {
            return Err(CampusEventsError::Config(
                format!("Unsupported language code: {}", code)
            ));
        }
    }

    Ok(())
}

/// Validate event defaults
fn validate_events_config(config: &super::EventsConfig) -> Result<()> {
    if config.default_total_seats < 1 {
        return Err(CampusEventsError::Config(
            "Default total seats must be positive".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CampusEventsError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CampusEventsError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
