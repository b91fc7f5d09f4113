//! Schedule query handlers.
//!
//! Each handler issues exactly one GraphQL request through the injected
//! client and projects the result into display sessions.

mod get_sessions_by_day;
mod get_sessions_by_room;
pub mod queries;

pub use get_sessions_by_day::{GetSessionsByDayHandler, GetSessionsByDayQuery, SessionsByDay};
pub use get_sessions_by_room::{
    GetSessionsByRoomHandler, GetSessionsByRoomQuery, SessionsByRoom,
};
