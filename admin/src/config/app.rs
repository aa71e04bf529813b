use super::{
    LoggingConfig,
    api::ApiConfig,
    limits::{LOG_LEVELS, MAX_API_TIMEOUT_SECS, MIN_API_TIMEOUT_SECS},
    validation::ConfigValidationError,
};
use crate::theme::types::ThemeConfig;
use crate::theme::validation::HexColorValidator;
use crate::validation::Validator;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    theme: ThemeConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(url) = self.api.base_url() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(ConfigValidationError::BaseUrl {
                    configured: url.to_string(),
                });
            }
        }

        let timeout = self.api.timeout_secs();
        if !(MIN_API_TIMEOUT_SECS..=MAX_API_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::ApiTimeout {
                configured: timeout,
                min_limit: MIN_API_TIMEOUT_SECS,
                max_limit: MAX_API_TIMEOUT_SECS,
            });
        }

        if let Some(accent) = self.theme.default_accent() {
            if HexColorValidator.validate(accent).is_err() {
                errors.push(ConfigValidationError::DefaultAccent {
                    configured: accent.to_string(),
                });
            }
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}
