use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid api.base_url: {configured}")]
    BaseUrl { configured: String },
    #[error("Invalid api.timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    ApiTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid theme.default_accent: {configured}")]
    DefaultAccent { configured: String },
    #[error("Invalid logging.level: {configured}")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::BaseUrl { configured } => {
                format!(
                    "API base URL is not a valid HTTP address!\n\n\
                    Your configured value: {configured}\n\n\
                    Please update base_url in the [api] section of config.toml to start with http:// or https://."
                )
            }
            ConfigValidationError::ApiTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "API timeout out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update timeout_secs in the [api] section of config.toml."
                )
            }
            ConfigValidationError::DefaultAccent { configured } => {
                format!(
                    "Default accent is not a hex color!\n\n\
                    Your configured value: {configured}\n\n\
                    Please update default_accent in the [theme] section of config.toml, e.g. \"#b5072a\"."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level!\n\n\
                    Your configured value: {configured}\n\n\
                    Please use one of trace, debug, info, warn or error."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
