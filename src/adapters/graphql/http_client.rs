//! HTTP GraphQL Client - Implementation of GraphQLClient over reqwest.
//!
//! Posts `{ query, operationName, variables }` to the CMS delivery endpoint
//! and returns the decoded JSON body.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpGraphQLConfig::new("https://edge.example.com/api/graphql/v1")
//!     .with_api_key(token)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = HttpGraphQLClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::config::CmsConfig;
use crate::ports::{GraphQLClient, GraphQLRequest, QueryError};

/// Configuration for the HTTP GraphQL client.
#[derive(Debug, Clone)]
pub struct HttpGraphQLConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Delivery API token.
    api_key: Option<Secret<String>>,
    /// Header the token is sent in.
    pub token_header: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpGraphQLConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            token_header: "X-GQL-Token".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the header the token is sent in.
    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API token (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }
}

impl From<&CmsConfig> for HttpGraphQLConfig {
    fn from(cms: &CmsConfig) -> Self {
        let config = Self::new(cms.endpoint.clone())
            .with_token_header(cms.token_header.clone())
            .with_timeout(cms.timeout());

        match cms.api_key.as_deref() {
            Some(key) if cms.has_api_key() => config.with_api_key(key),
            _ => config,
        }
    }
}

/// GraphQL client backed by a pooled reqwest client.
pub struct HttpGraphQLClient {
    config: HttpGraphQLConfig,
    client: Client,
}

impl HttpGraphQLClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: HttpGraphQLConfig) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QueryError::invalid_request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn send_request(&self, request: &GraphQLRequest) -> Result<Response, QueryError> {
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request);

        if let Some(key) = self.config.api_key() {
            builder = builder.header(self.config.token_header.as_str(), key);
        }

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                QueryError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                QueryError::network(format!("Connection failed: {}", e))
            } else {
                QueryError::network(e.to_string())
            }
        })
    }

    /// Passes successful responses through, converting the rest to errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, QueryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(status_error(status, &error_body, self.config.timeout.as_secs()))
    }
}

/// Maps a non-success HTTP status onto a [`QueryError`].
fn status_error(status: StatusCode, body: &str, timeout_secs: u64) -> QueryError {
    match status.as_u16() {
        401 | 403 => QueryError::AuthenticationFailed,
        400 | 422 => QueryError::invalid_request(body.to_string()),
        408 | 504 => QueryError::Timeout { timeout_secs },
        500..=599 => QueryError::unavailable(format!("Server error {}: {}", status, body)),
        _ => QueryError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

#[async_trait]
impl GraphQLClient for HttpGraphQLClient {
    async fn execute(&self, request: &GraphQLRequest) -> Result<Value, QueryError> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            "Sending GraphQL request"
        );

        let response = match self.send_request(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("GraphQL request failed: {}", err);
                return Err(err);
            }
        };
        let response = self.handle_response_status(response).await.map_err(|err| {
            tracing::error!("GraphQL endpoint returned an error: {}", err);
            err
        })?;

        let text = response
            .text()
            .await
            .map_err(|e| QueryError::network(e.to_string()))?;

        // Some CDN edges prepend a byte order mark
        serde_json::from_str(text.trim_start_matches('\u{feff}'))
            .map_err(|e| QueryError::parse(format!("Invalid JSON body: {}", e)))
    }
}
