//! Session projection.
//!
//! Flattens raw CMS session records into display-ready [`Session`] values.
//! Room, day and timeslot come either from the outer query context or from a
//! relation embedded on the record; the context value always wins.

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::records::{DayRecord, SessionRecord, SortOrder, TimeslotRecord, DISPLAY_LOCALE};
use crate::domain::foundation::DayIndex;

/// Segment written into the image URL when the asset chain is missing.
///
/// Consumers already recognize `undefined?v=undefined` as "no image", so the
/// placeholder is kept instead of producing an empty URL.
pub const MISSING_ASSET_SEGMENT: &str = "undefined";

/// Speakers beyond this count are dropped from the display string.
const MAX_LISTED_SPEAKERS: usize = 2;

/// Room resolved from the query context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

/// Day resolved from the query context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub name: Option<String>,
    pub sort_order: Option<String>,
}

impl Day {
    /// Day context derived from an index rather than read from the CMS.
    pub fn synthetic(index: DayIndex) -> Self {
        Self {
            name: Some(index.label()),
            sort_order: Some(index.sort_order()),
        }
    }

    pub fn from_record(record: &DayRecord) -> Self {
        Self {
            name: record.taxonomy_name.clone(),
            sort_order: record.sort_order.as_ref().map(|s| s.as_str().to_owned()),
        }
    }
}

/// Timeslot resolved from the query context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeslot {
    pub label: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Timeslot {
    pub fn from_record(record: &TimeslotRecord) -> Self {
        Self {
            label: record.label(DISPLAY_LOCALE).map(str::to_owned),
            sort_order: record.sort_order.clone(),
        }
    }
}

/// A session as shown on the schedule display.
///
/// Field names on the wire match what the display front-end reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,

    #[serde(rename = "isPremium", default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,

    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,

    #[serde(rename = "roomId", default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    #[serde(rename = "Day", default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    #[serde(rename = "ShortDay", default, skip_serializing_if = "Option::is_none")]
    pub short_day: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeslot: Option<String>,

    #[serde(
        rename = "sortOrder",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_sort_key"
    )]
    pub sort_order: Option<f64>,
}

/// Largest magnitude below which every integral `f64` is exact as `i64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Whole keys go out as JSON integers, fractional ones as floats.
fn serialize_sort_key<S>(key: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *key {
        Some(k) if k.fract() == 0.0 && k.abs() < EXACT_INTEGER_LIMIT => {
            serializer.serialize_i64(k as i64)
        }
        Some(k) => serializer.serialize_f64(k),
        None => serializer.serialize_none(),
    }
}

/// Projects a raw session record into a [`Session`].
///
/// Never fails: missing relations leave the corresponding fields unset.
pub fn project_session(
    raw: &SessionRecord,
    day: Option<&Day>,
    timeslot: Option<&Timeslot>,
    room: Option<&Room>,
    include_speakers: bool,
) -> Session {
    let mut session = Session {
        id: raw.id.clone(),
        name: raw.name.clone(),
        session_type: raw.session_type().map(str::to_owned),
        is_premium: raw.is_premium,
        image: image_url(raw),
        ..Session::default()
    };

    if include_speakers {
        session.speaker = format_speakers(&raw.speaker_names());
    }

    // Sessions linked to several rooms only ever show the first one.
    if let Some(room) = room {
        session.room_id = Some(room.id.clone());
        session.room = room.name.clone();
    } else if let Some(embedded) = &raw.room {
        session.room_id = embedded.id.clone();
        session.room = embedded.name.clone();
    }

    let day = day
        .cloned()
        .or_else(|| raw.day_to_session.as_ref().map(Day::from_record));
    if let Some(day) = day {
        session.day = day.name;
        session.short_day = day.sort_order;
    }

    let timeslot = timeslot
        .cloned()
        .or_else(|| raw.first_timeslot().map(Timeslot::from_record));
    if let Some(timeslot) = timeslot {
        session.timeslot = timeslot.label;
        session.sort_order = timeslot.sort_order.as_ref().and_then(SortOrder::as_key);
    }

    session
}

/// Cache-busted image URL built from the first public link.
fn image_url(raw: &SessionRecord) -> String {
    let link = raw.first_public_link();
    let relative_url = link
        .and_then(|l| l.relative_url.as_deref())
        .unwrap_or(MISSING_ASSET_SEGMENT);
    let version_hash = link
        .and_then(|l| l.version_hash.as_deref())
        .unwrap_or(MISSING_ASSET_SEGMENT);

    format!("{}?v={}", relative_url, version_hash)
}

/// Builds the speaker display string.
///
/// No speakers gives `None`, one speaker gives that name, and two or more give
/// the first two names joined by `", "`.
pub fn format_speakers(names: &[Option<&str>]) -> Option<String> {
    match names {
        [] => None,
        [only] => only.map(str::to_owned),
        _ => Some(
            names
                .iter()
                .take(MAX_LISTED_SPEAKERS)
                .map(|name| name.unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

/// Stable ascending sort by timeslot key. Sessions without a key go last.
pub fn sort_sessions(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| match (a.sort_order, b.sort_order) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Accumulates projected sessions for one query result.
///
/// A (session, timeslot) pair is kept only the first time it is seen.
#[derive(Debug, Default)]
pub struct SessionCollector {
    seen: HashSet<(String, Option<String>, Option<u64>)>,
    sessions: Vec<Session>,
}

impl SessionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session, returning `false` if the pair was already collected.
    pub fn push(&mut self, session: Session) -> bool {
        let key = (
            session.id.clone(),
            session.timeslot.clone(),
            session.sort_order.map(f64::to_bits),
        );
        if !self.seen.insert(key) {
            return false;
        }
        self.sessions.push(session);
        true
    }

    /// Returns the collected sessions in display order.
    pub fn finish(self) -> Vec<Session> {
        let mut sessions = self.sessions;
        sort_sessions(&mut sessions);
        sessions
    }
}
