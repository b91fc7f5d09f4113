//! GetSessionsByDayHandler - Query handler for every session on one day.

use serde::Serialize;
use std::sync::Arc;

use super::queries::{
    decode_data, sessions_by_day_request, DayResult, SessionsByDayData, SESSIONS_BY_DAY_OPERATION,
};
use crate::domain::foundation::DayIndex;
use crate::domain::schedule::{
    project_session, Day, ScheduleError, Session, SessionCollector, Timeslot,
};
use crate::ports::GraphQLClient;

/// Query for all sessions on a given day.
#[derive(Debug, Clone)]
pub struct GetSessionsByDayQuery {
    pub day: DayIndex,
}

/// Sessions of the day, ordered by timeslot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionsByDay {
    pub sessions: Vec<Session>,
}

/// Handler for day schedule queries.
pub struct GetSessionsByDayHandler {
    client: Arc<dyn GraphQLClient>,
}

impl GetSessionsByDayHandler {
    pub fn new(client: Arc<dyn GraphQLClient>) -> Self {
        Self { client }
    }

    pub async fn handle(&self, query: GetSessionsByDayQuery) -> Result<SessionsByDay, ScheduleError> {
        tracing::debug!(day = %query.day, "Fetching sessions by day");

        let request = sessions_by_day_request(query.day);
        let body = self.client.execute(&request).await?;
        let data: SessionsByDayData = decode_data(SESSIONS_BY_DAY_OPERATION, body)?;

        let Some(record) = data.days.results.into_iter().next() else {
            tracing::warn!(day = %query.day, "Day not found");
            return Err(ScheduleError::day_not_found(query.day));
        };

        let result = collect_day_sessions(&record);
        tracing::info!(day = %query.day, count = result.sessions.len(), "Loaded day sessions");
        Ok(result)
    }
}

/// One entry per (session, timeslot); rooms come from each session record.
fn collect_day_sessions(record: &DayResult) -> SessionsByDay {
    let day_context = Day {
        name: record.taxonomy_name.clone(),
        sort_order: record.sort_order.as_ref().map(|s| s.as_str().to_owned()),
    };

    let mut collector = SessionCollector::new();
    for session in record.day_to_session.iter() {
        for slot in session.timeslot_to_session.iter() {
            let timeslot = Timeslot::from_record(slot);
            collector.push(project_session(
                session,
                Some(&day_context),
                Some(&timeslot),
                None,
                false,
            ));
        }
    }

    SessionsByDay {
        sessions: collector.finish(),
    }
}
