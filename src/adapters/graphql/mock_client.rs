//! Mock GraphQL Client for testing.
//!
//! Provides a configurable implementation of the GraphQLClient port so the
//! schedule handlers can be exercised without network access.
//!
//! # Example
//!
//! ```ignore
//! let client = MockGraphQLClient::new()
//!     .with_data(json!({ "allDemo_Day": { "results": [] } }));
//!
//! let body = client.execute(&request).await?;
//! assert_eq!(client.call_count(), 1);
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{GraphQLClient, GraphQLRequest, QueryError};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response body.
    Body(Value),
    /// Fail with this error.
    Error(QueryError),
}

/// Mock GraphQL client.
///
/// Replies are consumed in order; every executed request is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockGraphQLClient {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<GraphQLRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGraphQLClient {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response body.
    pub fn with_response(self, body: Value) -> Self {
        lock(&self.replies).push_back(MockReply::Body(body));
        self
    }

    /// Queues a successful response wrapping `data`.
    pub fn with_data(self, data: Value) -> Self {
        self.with_response(json!({ "data": data }))
    }

    /// Queues a failure.
    pub fn with_error(self, error: QueryError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// The most recent request, if any.
    pub fn last_call(&self) -> Option<GraphQLRequest> {
        lock(&self.calls).last().cloned()
    }
}

#[async_trait]
impl GraphQLClient for MockGraphQLClient {
    async fn execute(&self, request: &GraphQLRequest) -> Result<Value, QueryError> {
        lock(&self.calls).push(request.clone());

        match lock(&self.replies).pop_front() {
            Some(MockReply::Body(body)) => Ok(body),
            Some(MockReply::Error(err)) => Err(err),
            None => Err(QueryError::unavailable("no mock reply configured")),
        }
    }
}
