//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, errors)
//! - `schedule` - Session records, projection and ordering

pub mod foundation;
pub mod schedule;
