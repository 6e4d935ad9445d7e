use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API base URL is not set")]
    MissingBaseUrl,
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where and how the client talks to the backend.
///
/// Timeouts are unset by default so the transport's own behaviour applies.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl ApiConfig {
    pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 5 * 1024 * 1024;

    /// Validates `base_url` and strips trailing slashes so paths can be
    /// appended directly.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: "base URL must not carry a query or fragment".to_string(),
            });
        }
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_response_bytes: Self::DEFAULT_MAX_RESPONSE_BYTES,
        })
    }

    /// Like [`ApiConfig::new`], treating an absent value as missing.
    pub fn from_optional(base_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::new(base_url.ok_or(ConfigError::MissingBaseUrl)?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
