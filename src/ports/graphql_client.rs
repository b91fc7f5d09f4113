//! GraphQL Client Port - Interface to the CMS content delivery API.
//!
//! The schedule handlers only build query documents and interpret the
//! response shape; transport, authentication and endpoint details live
//! behind this port.
//!
//! # Design
//!
//! - One `execute` call is exactly one outbound request
//! - No retries, caching, pagination or timeouts at this level
//! - Query values travel as GraphQL variables, never spliced into the query text
//!
//! # Example
//!
//! ```ignore
//! let request = GraphQLRequest::new("query Rooms { allDemo_Room { results { id } } }")
//!     .with_operation_name("Rooms");
//! let body = client.execute(&request).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Port for executing GraphQL operations.
#[async_trait]
pub trait GraphQLClient: Send + Sync {
    /// Executes the request and returns the parsed response body.
    ///
    /// The body is returned as-is, including any GraphQL `errors` member.
    async fn execute(&self, request: &GraphQLRequest) -> Result<Value, QueryError>;
}

/// A GraphQL operation with its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: Map::new(),
        }
    }

    /// Sets the operation to run when the document holds several.
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Binds a variable value.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// Standard GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphQLResponse<T> {
    #[serde(default)]
    pub data: Option<T>,

    #[serde(
        default,
        deserialize_with = "crate::domain::schedule::records::null_as_default"
    )]
    pub errors: Vec<GraphQLErrorEntry>,
}

impl<T> GraphQLResponse<T> {
    /// Messages of every entry in `errors`, in response order.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Extracts `data`, turning a data-less error response into [`QueryError`].
    ///
    /// Partial responses (data plus errors) keep the data.
    pub fn into_data(self) -> Result<T, QueryError> {
        match self.data {
            Some(data) => Ok(data),
            None if !self.errors.is_empty() => Err(QueryError::GraphQL(
                self.errors.into_iter().map(|e| e.message).collect(),
            )),
            None => Err(QueryError::parse("response contains neither data nor errors")),
        }
    }
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQLErrorEntry {
    #[serde(default)]
    pub message: String,
}

/// Errors from the content API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// API token missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Content API is unavailable.
    #[error("content API unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The API rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API answered with GraphQL errors and no data.
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),
}

impl QueryError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QueryError::Network(_) | QueryError::Unavailable { .. } => {
                ErrorCode::UpstreamUnavailable
            }
            QueryError::Timeout { .. } => ErrorCode::UpstreamTimeout,
            QueryError::AuthenticationFailed => ErrorCode::Unauthorized,
            QueryError::InvalidRequest(_) | QueryError::GraphQL(_) => ErrorCode::QueryRejected,
            QueryError::Parse(_) => ErrorCode::MalformedResponse,
        }
    }
}
