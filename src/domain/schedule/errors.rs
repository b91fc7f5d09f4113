//! Schedule-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DayIndex, ErrorCode, RoomId};
use crate::ports::QueryError;

/// Errors raised while loading a session schedule.
#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    /// No room record matched the requested id.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// No day record matched the requested sort order.
    #[error("day not found: {0}")]
    DayNotFound(DayIndex),

    /// The content API call failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ScheduleError {
    pub fn room_not_found(id: RoomId) -> Self {
        ScheduleError::RoomNotFound(id)
    }

    pub fn day_not_found(day: DayIndex) -> Self {
        ScheduleError::DayNotFound(day)
    }

    pub fn malformed(message: impl ToString) -> Self {
        ScheduleError::MalformedResponse(message.to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            ScheduleError::DayNotFound(_) => ErrorCode::DayNotFound,
            ScheduleError::Query(err) => err.code(),
            ScheduleError::MalformedResponse(_) => ErrorCode::MalformedResponse,
        }
    }

    /// Whether the failure means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScheduleError::RoomNotFound(_) | ScheduleError::DayNotFound(_)
        )
    }
}
