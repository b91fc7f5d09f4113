//! GraphQL documents and response envelopes for the schedule queries.
//!
//! Lookup keys are bound as variables; the documents themselves are constant.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::{DayIndex, RoomId};
use crate::domain::schedule::records::null_as_default;
use crate::domain::schedule::{Results, ScheduleError, SessionRecord, SortOrder, VenueRecord};
use crate::ports::{GraphQLRequest, GraphQLResponse};

pub const SESSIONS_BY_ROOM_OPERATION: &str = "SessionsByRoom";
pub const SESSIONS_BY_DAY_OPERATION: &str = "SessionsByDay";

/// Sessions of one room, with the day each session belongs to.
pub const SESSIONS_BY_ROOM_QUERY: &str = r#"
query SessionsByRoom($roomId: String!) {
  allDemo_Room(where: { id_eq: $roomId }) {
    results {
      id
      name
      venue: rooms {
        name
      }
      session: session_Room {
        results {
          ... on M_Content_Session {
            id
            name: session_Name
            isPremium: session_PremiumSession
            sessionToMasterAsset: cmpContentToMasterLinkedAsset {
              results {
                assetToPublicLink(first: 1) {
                  results {
                    relativeUrl
                    versionHash
                  }
                }
              }
            }
            dayToSession: session_Days {
              taxonomyName
              sortOrder
            }
            timeslotToSession: session_Timeslot {
              results {
                taxonomyLabel
                sortOrder
              }
            }
            sessionsTypeToSessions: session_SessionType {
              taxonomyName
            }
            speakers: reference_Session_Speakers_Parents {
              results {
                ... on M_Content_Speaker {
                  name: speaker_Name
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Sessions of one day, with the room each session is held in.
pub const SESSIONS_BY_DAY_QUERY: &str = r#"
query SessionsByDay($sortOrder: Int!) {
  allDemo_Day(where: { sortOrder_eq: $sortOrder }) {
    results {
      sortOrder
      taxonomyName
      dayToSession: session_Days {
        results {
          ... on M_Content_Session {
            id
            name: session_Name
            isPremium: session_PremiumSession
            sessionToMasterAsset: cmpContentToMasterLinkedAsset {
              results {
                assetToPublicLink(first: 1) {
                  results {
                    id
                    relativeUrl
                    versionHash
                  }
                }
              }
            }
            room: session_Room {
              id
              name
            }
            timeslotToSession: session_Timeslot {
              results {
                taxonomyLabel
                sortOrder
              }
            }
            sessionsTypeToSessions: session_SessionType {
              taxonomyName
            }
            speakers: reference_Session_Speakers_Parents {
              results {
                ... on M_Content_Speaker {
                  name: speaker_Name
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub fn sessions_by_room_request(room_id: &RoomId) -> GraphQLRequest {
    GraphQLRequest::new(SESSIONS_BY_ROOM_QUERY)
        .with_operation_name(SESSIONS_BY_ROOM_OPERATION)
        .with_variable("roomId", room_id.as_str())
}

pub fn sessions_by_day_request(day: DayIndex) -> GraphQLRequest {
    GraphQLRequest::new(SESSIONS_BY_DAY_QUERY)
        .with_operation_name(SESSIONS_BY_DAY_OPERATION)
        .with_variable("sortOrder", day.value())
}

/// Decodes a response body into its typed `data` member.
///
/// Errors that arrive alongside data are logged and the data is kept.
pub fn decode_data<T: DeserializeOwned>(operation: &str, body: Value) -> Result<T, ScheduleError> {
    let response: GraphQLResponse<T> =
        serde_json::from_value(body).map_err(ScheduleError::malformed)?;

    if !response.errors.is_empty() {
        let errors = response.error_messages().join("; ");
        if response.data.is_some() {
            tracing::warn!(operation, %errors, "partial GraphQL response, keeping data");
        } else {
            tracing::warn!(operation, %errors, "GraphQL response has errors and no data");
        }
    }

    Ok(response.into_data()?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsByRoomData {
    #[serde(rename = "allDemo_Room", default, deserialize_with = "null_as_default")]
    pub rooms: Results<RoomResult>,
}

/// Room record with its linked sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomResult {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub venue: Option<VenueRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub session: Results<SessionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsByDayData {
    #[serde(rename = "allDemo_Day", default, deserialize_with = "null_as_default")]
    pub days: Results<DayResult>,
}

/// Day taxonomy record with its linked sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResult {
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub taxonomy_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_to_session: Results<SessionRecord>,
}
