//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod schedule;

pub use schedule::{
    GetSessionsByDayHandler, GetSessionsByDayQuery, GetSessionsByRoomHandler,
    GetSessionsByRoomQuery, SessionsByDay, SessionsByRoom,
};
