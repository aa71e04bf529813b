use crate::model::Level;
use thiserror::Error;

/// Errors raised while fetching taxonomy data from the backend.
///
/// Filtering, cascading and reconciliation never produce errors; every
/// variant here belongs to the data-fetching boundary in [`crate::source`].
///
/// # Examples
///
/// ```no_run
/// use catalog::errors::CatalogError;
///
/// fn describe(error: &CatalogError) -> &'static str {
///     match error {
///         CatalogError::Status { status, .. } if *status == 401 => "Sign in again",
///         CatalogError::RequestFailed { .. } => "Check the network connection",
///         _ => "Taxonomy data could not be loaded",
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP client could not be built from the supplied configuration.
    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    /// The request never produced a response.
    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The backend answered with a non-success status.
    #[error("Request to {url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not a recognizable list of nodes.
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The request cannot be expressed for this level.
    #[error("Invalid request for {level} level: {reason}")]
    InvalidRequest { level: Level, reason: String },
}

impl CatalogError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::RequestFailed { .. } => true,
            CatalogError::Status { status, .. } => *status >= 500 || *status == 429,
            CatalogError::ClientCreation { .. }
            | CatalogError::Decode { .. }
            | CatalogError::InvalidRequest { .. } => false,
        }
    }
}
