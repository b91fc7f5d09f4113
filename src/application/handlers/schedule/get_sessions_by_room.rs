//! GetSessionsByRoomHandler - Query handler for one room's sessions on one day.

use serde::Serialize;
use std::sync::Arc;

use super::queries::{
    decode_data, sessions_by_room_request, RoomResult, SessionsByRoomData,
    SESSIONS_BY_ROOM_OPERATION,
};
use crate::domain::foundation::{DayIndex, RoomId};
use crate::domain::schedule::{
    project_session, Day, Room, ScheduleError, Session, SessionCollector, Timeslot,
};
use crate::ports::GraphQLClient;

/// Query for the sessions held in a room on a given day.
#[derive(Debug, Clone)]
pub struct GetSessionsByRoomQuery {
    pub room_id: RoomId,
    pub day: DayIndex,
}

/// Sessions of the room, ordered by timeslot, plus the room itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionsByRoom {
    pub sessions: Vec<Session>,
    pub room: Room,
}

/// Handler for room schedule queries.
pub struct GetSessionsByRoomHandler {
    client: Arc<dyn GraphQLClient>,
}

impl GetSessionsByRoomHandler {
    pub fn new(client: Arc<dyn GraphQLClient>) -> Self {
        Self { client }
    }

    pub async fn handle(&self, query: GetSessionsByRoomQuery) -> Result<SessionsByRoom, ScheduleError> {
        tracing::debug!(room_id = %query.room_id, day = %query.day, "Fetching sessions by room");

        let request = sessions_by_room_request(&query.room_id);
        let body = self.client.execute(&request).await?;
        let data: SessionsByRoomData = decode_data(SESSIONS_BY_ROOM_OPERATION, body)?;

        let Some(record) = data.rooms.results.into_iter().next() else {
            tracing::warn!(room_id = %query.room_id, "Room not found");
            return Err(ScheduleError::room_not_found(query.room_id));
        };

        let result = collect_room_sessions(record, query.day);
        tracing::info!(
            room_id = %result.room.id,
            day = %query.day,
            count = result.sessions.len(),
            "Loaded room sessions"
        );
        Ok(result)
    }
}

/// Keeps the sessions whose embedded day matches `day`, one entry per timeslot.
///
/// Emitted sessions always carry the synthetic day built from `day`. Sessions
/// without an embedded day are never emitted.
fn collect_room_sessions(record: RoomResult, day: DayIndex) -> SessionsByRoom {
    let room = Room {
        id: record.id,
        name: record.name,
        venue: record.venue.and_then(|v| v.name),
    };
    let day_context = Day::synthetic(day);
    let requested = day.sort_order();

    let mut collector = SessionCollector::new();
    for session in record.session.iter() {
        let on_requested_day = session
            .day_sort_order()
            .is_some_and(|order| order.as_str() == requested);
        if !on_requested_day {
            continue;
        }

        for slot in session.timeslot_to_session.iter() {
            let timeslot = Timeslot::from_record(slot);
            collector.push(project_session(
                session,
                Some(&day_context),
                Some(&timeslot),
                Some(&room),
                true,
            ));
        }
    }

    SessionsByRoom {
        sessions: collector.finish(),
        room,
    }
}
