use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod api;
pub mod app;
pub mod limits;
pub mod validation;

pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Global configuration loading and access
static CONFIG: std::sync::OnceLock<ConfigLoadResult> = std::sync::OnceLock::new();

/// Load configuration from `path` (or `config.toml`) and the environment.
///
/// The file is optional: every setting has a default, and environment
/// variables such as `API__BASE_URL` override file values.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();
    let env_source = Environment::default().separator("__");

    let file_source = match path {
        Some(path) => File::from(path.to_path_buf()).required(true),
        None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
    };

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => {
            if let Err(validation_errors) = app_config.validate() {
                let error_messages: Vec<String> =
                    validation_errors.iter().map(|e| e.user_message()).collect();
                return ConfigLoadResult::DeserializeError(format!(
                    "Configuration validation failed:\n{}",
                    error_messages.join("\n\n")
                ));
            }
            ConfigLoadResult::Success(Box::new(app_config))
        }
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Load the configuration once; later calls return the first result and
/// ignore `path`.
pub fn init_config(path: Option<&Path>) -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config(path))
}

pub fn get_config() -> &'static ConfigLoadResult {
    init_config(None)
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
