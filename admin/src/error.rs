use catalog::CatalogError;
use std::fmt::Display;

/// Application-wide error type for the admin console.
///
/// Variants carry a ready-to-print message. Library errors from the
/// catalog crate and I/O errors convert automatically so `?` works across
/// the crate boundary.
///
/// # Examples
///
/// ```no_run
/// use admin::error::{AppError, AppResult};
///
/// fn load_universe(path: &str) -> AppResult<String> {
///     std::fs::read_to_string(path)
///         .map_err(|e| AppError::Io(format!("Failed to read '{path}': {e}")))
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration loading and validation errors.
    Config(String),

    /// Theme preferences could not be read or written.
    ///
    /// The in-memory theme still reflects the change; only persistence failed.
    Storage(String),

    /// Taxonomy fetch or decode failures from the backend.
    Catalog(String),

    /// File system failures outside theme storage.
    Io(String),

    /// User input rejected before it reached the domain.
    Validation(String),

    /// Global state used before initialization or initialized twice.
    State(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
            AppError::Catalog(msg) => write!(f, "Catalog Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::State(msg) => write!(f, "State Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Catalog(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Level;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            AppError::Storage("disk full".to_string()).to_string(),
            "Storage Error: disk full"
        );
        assert_eq!(
            AppError::Validation("bad color".to_string()).to_string(),
            "Validation Error: bad color"
        );
    }

    #[test]
    fn test_catalog_error_conversion() {
        let err: AppError = CatalogError::InvalidRequest {
            level: Level::Caste,
            reason: "parent required".to_string(),
        }
        .into();

        match err {
            AppError::Catalog(msg) => assert!(msg.contains("parent required")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(AppError::from(io), AppError::Io("denied".to_string()));
    }
}
