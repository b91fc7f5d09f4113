//! CMS content API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Connection settings for the CMS GraphQL delivery endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CmsConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,

    /// Delivery API token
    pub api_key: Option<String>,

    /// Header the token is sent in
    #[serde(default = "default_token_header")]
    pub token_header: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CmsConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API token is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate CMS configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("CMS__ENDPOINT"));
        }
        if !self.endpoint.starts_with("https://") && !self.endpoint.starts_with("http://") {
            return Err(ValidationError::InvalidEndpointUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        let header_ok = !self.token_header.is_empty()
            && self
                .token_header
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !header_ok {
            return Err(ValidationError::InvalidTokenHeader);
        }
        Ok(())
    }
}

fn default_token_header() -> String {
    "X-GQL-Token".to_string()
}

fn default_timeout() -> u64 {
    30
}
