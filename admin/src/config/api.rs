use super::limits::DEFAULT_API_TIMEOUT_SECS;
use serde::Deserialize;
use std::time::Duration;

/// `[api]` section: where taxonomy data is fetched from.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiConfig {
    base_url: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Bearer token sent with every request, usually supplied as `API__TOKEN`.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.trim().is_empty())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_API_TIMEOUT_SECS)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs())
    }
}
