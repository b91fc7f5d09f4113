//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `graphql` - CMS content API clients (HTTP, mock)

pub mod graphql;

pub use graphql::{HttpGraphQLClient, HttpGraphQLConfig, MockGraphQLClient, MockReply};
