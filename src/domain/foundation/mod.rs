//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and error types that form the vocabulary
//! of the schedule domain.

mod errors;
mod ids;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{DayIndex, RoomId, MAX_DAY_INDEX};
