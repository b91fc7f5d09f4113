//! GraphQL Client Adapters.
//!
//! Implementations of the GraphQLClient port.
//!
//! ## Available Adapters
//!
//! - `HttpGraphQLClient` - reqwest transport to the CMS delivery endpoint
//! - `MockGraphQLClient` - Configurable mock for testing

mod http_client;
mod mock_client;

pub use http_client::{HttpGraphQLClient, HttpGraphQLConfig};
pub use mock_client::{MockGraphQLClient, MockReply};
