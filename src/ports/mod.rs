//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GraphQLClient` - Port for the CMS content delivery GraphQL API

mod graphql_client;

pub use graphql_client::{
    GraphQLClient, GraphQLErrorEntry, GraphQLRequest, GraphQLResponse, QueryError,
};
