//! Integration tests for the schedule query handlers.
//!
//! These tests drive both handlers through the public API with a mock
//! GraphQL client standing in for the CMS:
//! 1. The request carries the right operation and variables
//! 2. Raw CMS payloads are projected, filtered and ordered
//! 3. Missing records and upstream failures surface as errors

use serde_json::{json, Value};
use std::sync::Arc;

use session_schedule::adapters::MockGraphQLClient;
use session_schedule::application::{
    GetSessionsByDayHandler, GetSessionsByDayQuery, GetSessionsByRoomHandler,
    GetSessionsByRoomQuery,
};
use session_schedule::domain::foundation::{DayIndex, ErrorCode, RoomId};
use session_schedule::domain::schedule::ScheduleError;
use session_schedule::ports::QueryError;

// =============================================================================
// Fixtures
// =============================================================================

fn cms_session(id: &str, day_order: &str, slots: Value) -> Value {
    json!({
        "id": id,
        "name": format!("Talk {}", id),
        "isPremium": id.ends_with('p'),
        "sessionToMasterAsset": { "results": [
            { "assetToPublicLink": { "results": [
                { "relativeUrl": format!("/api/public/content/{}", id), "versionHash": "h1" }
            ] } }
        ] },
        "dayToSession": { "taxonomyName": format!("Day {}", day_order), "sortOrder": day_order },
        "room": { "id": "embedded", "name": "Embedded Room" },
        "timeslotToSession": { "results": slots },
        "sessionsTypeToSessions": { "taxonomyName": "Keynote" },
        "speakers": { "results": [ { "name": "Ada Lovelace" }, { "name": "Grace Hopper" } ] }
    })
}

fn slot(label: &str, order: &str) -> Value {
    json!({ "taxonomyLabel": { "en-US": label, "fr-CA": "ignored" }, "sortOrder": order })
}

// =============================================================================
// Sessions by room
// =============================================================================

#[tokio::test]
async fn room_schedule_filters_by_day_and_orders_by_timeslot() {
    let client = MockGraphQLClient::new().with_data(json!({
        "allDemo_Room": { "results": [ {
            "id": "R1",
            "name": "Ballroom A",
            "venue": { "name": "Harbour Center" },
            "session": { "results": [
                cms_session("s-late", "1", json!({ "results": [ slot("4:00 PM", "9") ] })),
                cms_session("s-other-day", "2", json!({ "results": [ slot("9:00 AM", "1") ] })),
                cms_session("s-early-p", "1", json!({ "results": [ slot("9:30 AM", "2"), slot("11:00 AM", "5") ] }))
            ] }
        } ] }
    }));
    let handler = GetSessionsByRoomHandler::new(Arc::new(client.clone()));

    let result = handler
        .handle(GetSessionsByRoomQuery {
            room_id: RoomId::new("R1").unwrap(),
            day: DayIndex::new(1).unwrap(),
        })
        .await
        .unwrap();

    let entries: Vec<_> = result
        .sessions
        .iter()
        .map(|s| (s.id.as_str(), s.timeslot.as_deref()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("s-early-p", Some("9:30 AM")),
            ("s-early-p", Some("11:00 AM")),
            ("s-late", Some("4:00 PM")),
        ]
    );

    for session in &result.sessions {
        assert_eq!(session.day.as_deref(), Some("Day 2"));
        assert_eq!(session.short_day.as_deref(), Some("1"));
        assert_eq!(session.room_id.as_deref(), Some("R1"));
        assert_eq!(session.room.as_deref(), Some("Ballroom A"));
        assert_eq!(session.speaker.as_deref(), Some("Ada Lovelace, Grace Hopper"));
        assert_eq!(session.session_type.as_deref(), Some("Keynote"));
    }
    assert_eq!(result.sessions[0].is_premium, Some(true));
    assert_eq!(result.sessions[0].image, "/api/public/content/s-early-p?v=h1");
    assert_eq!(result.room.venue.as_deref(), Some("Harbour Center"));

    let request = client.last_call().unwrap();
    assert_eq!(request.operation_name.as_deref(), Some("SessionsByRoom"));
    assert_eq!(request.variable("roomId"), Some(&json!("R1")));
}

#[tokio::test]
async fn room_schedule_serializes_for_the_display() {
    let client = MockGraphQLClient::new().with_data(json!({
        "allDemo_Room": { "results": [ {
            "id": "R1",
            "name": "Ballroom A",
            "venue": null,
            "session": { "results": [
                cms_session("s1", "0", json!({ "results": [ slot("9:00 AM", "1") ] }))
            ] }
        } ] }
    }));
    let handler = GetSessionsByRoomHandler::new(Arc::new(client));

    let result = handler
        .handle(GetSessionsByRoomQuery {
            room_id: RoomId::new("R1").unwrap(),
            day: DayIndex::new(0).unwrap(),
        })
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["room"], json!({ "id": "R1", "name": "Ballroom A" }));
    assert_eq!(
        value["sessions"][0],
        json!({
            "id": "s1",
            "name": "Talk s1",
            "type": "Keynote",
            "isPremium": false,
            "image": "/api/public/content/s1?v=h1",
            "speaker": "Ada Lovelace, Grace Hopper",
            "roomId": "R1",
            "room": "Ballroom A",
            "Day": "Day 1",
            "ShortDay": "0",
            "timeslot": "9:00 AM",
            "sortOrder": 1
        })
    );
}

#[tokio::test]
async fn unknown_room_is_reported_as_not_found() {
    let client = MockGraphQLClient::new().with_data(json!({ "allDemo_Room": { "results": [] } }));
    let handler = GetSessionsByRoomHandler::new(Arc::new(client));

    let err = handler
        .handle(GetSessionsByRoomQuery {
            room_id: RoomId::new("nope").unwrap(),
            day: DayIndex::new(0).unwrap(),
        })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), ErrorCode::RoomNotFound);
}

// =============================================================================
// Sessions by day
// =============================================================================

#[tokio::test]
async fn day_schedule_emits_every_session_timeslot_pair() {
    let client = MockGraphQLClient::new().with_data(json!({
        "allDemo_Day": { "results": [ {
            "sortOrder": 0,
            "taxonomyName": "Day 1",
            "dayToSession": { "results": [
                cms_session("a", "0", json!({ "results": [ slot("1:00 PM", "6"), slot("9:00 AM", "1") ] })),
                cms_session("b", "0", json!({ "results": [ slot("10:00 AM", "2"), slot("3:00 PM", "8") ] }))
            ] }
        } ] }
    }));
    let handler = GetSessionsByDayHandler::new(Arc::new(client.clone()));

    let result = handler
        .handle(GetSessionsByDayQuery {
            day: DayIndex::new(0).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(result.sessions.len(), 4);
    let keys: Vec<_> = result
        .sessions
        .iter()
        .map(|s| (s.id.as_str(), s.sort_order))
        .collect();
    assert_eq!(
        keys,
        vec![("a", Some(1.0)), ("b", Some(2.0)), ("a", Some(6.0)), ("b", Some(8.0))]
    );
    for session in &result.sessions {
        assert_eq!(session.day.as_deref(), Some("Day 1"));
        assert_eq!(session.short_day.as_deref(), Some("0"));
        assert_eq!(session.room_id.as_deref(), Some("embedded"));
        assert!(session.speaker.is_none());
    }

    let request = client.last_call().unwrap();
    assert_eq!(request.operation_name.as_deref(), Some("SessionsByDay"));
    assert_eq!(request.variable("sortOrder"), Some(&json!(0)));
}

#[tokio::test]
async fn unknown_day_is_reported_as_not_found() {
    let client = MockGraphQLClient::new().with_data(json!({ "allDemo_Day": null }));
    let handler = GetSessionsByDayHandler::new(Arc::new(client));

    let err = handler
        .handle(GetSessionsByDayQuery {
            day: DayIndex::new(7).unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ScheduleError::DayNotFound(day) if day == DayIndex::new(7).unwrap()));
}

#[tokio::test]
async fn transport_failures_propagate_unchanged() {
    let client = MockGraphQLClient::new().with_error(QueryError::Timeout { timeout_secs: 30 });
    let handler = GetSessionsByDayHandler::new(Arc::new(client));

    let err = handler
        .handle(GetSessionsByDayQuery {
            day: DayIndex::new(0).unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScheduleError::Query(QueryError::Timeout { timeout_secs: 30 })
    ));
    assert_eq!(err.code(), ErrorCode::UpstreamTimeout);
}
