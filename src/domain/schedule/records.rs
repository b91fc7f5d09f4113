//! Raw CMS record shapes.
//!
//! These mirror the nested JSON returned by the content delivery GraphQL API.
//! Relations are modelled as optional fields or possibly-empty connections so
//! that partially populated records still deserialize; absence is resolved
//! later by the projector rather than rejected here.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// Locale whose timeslot label is shown.
pub const DISPLAY_LOCALE: &str = "en-US";

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// CMS connection wrapper, `{ "results": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Results<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

impl<T> Default for Results<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

impl<T> Results<T> {
    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

/// Taxonomy sort order.
///
/// The CMS encodes sort orders as small integers but delivers them either as
/// JSON strings or numbers depending on the field. Both normalize to the
/// string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortOrder(String);

impl SortOrder {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric sequencing key, `None` when the value is not a finite number.
    pub fn as_key(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|key| key.is_finite())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => SortOrder(s),
            Raw::Integer(n) => SortOrder(n.to_string()),
            Raw::Float(f) => SortOrder(f.to_string()),
        })
    }
}

/// A conference session as stored in the CMS.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub is_premium: Option<bool>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub session_to_master_asset: Results<AssetRecord>,

    /// Present when the session is reached through its day.
    #[serde(default)]
    pub room: Option<RoomRecord>,

    /// Present when the session is reached through its room.
    #[serde(default)]
    pub day_to_session: Option<DayRecord>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub timeslot_to_session: Results<TimeslotRecord>,

    #[serde(default)]
    pub sessions_type_to_sessions: Option<TaxonomyRecord>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub speakers: Results<SpeakerRecord>,
}

impl SessionRecord {
    /// First public link of the first linked master asset.
    pub fn first_public_link(&self) -> Option<&PublicLinkRecord> {
        self.session_to_master_asset
            .first()
            .and_then(|asset| asset.asset_to_public_link.first())
    }

    /// Display name of the session type taxonomy.
    pub fn session_type(&self) -> Option<&str> {
        self.sessions_type_to_sessions
            .as_ref()
            .and_then(|t| t.taxonomy_name.as_deref())
    }

    /// Speaker names in CMS order. Non-speaker references yield `None`.
    pub fn speaker_names(&self) -> Vec<Option<&str>> {
        self.speakers.iter().map(|s| s.name.as_deref()).collect()
    }

    pub fn first_timeslot(&self) -> Option<&TimeslotRecord> {
        self.timeslot_to_session.first()
    }

    /// Sort order of the embedded day relation.
    pub fn day_sort_order(&self) -> Option<&SortOrder> {
        self.day_to_session
            .as_ref()
            .and_then(|d| d.sort_order.as_ref())
    }
}

/// Room reference embedded on a session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoomRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Day taxonomy reference embedded on a session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(default)]
    pub taxonomy_name: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotRecord {
    /// Label keyed by locale.
    #[serde(default, deserialize_with = "null_as_default")]
    pub taxonomy_label: HashMap<String, Option<String>>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl TimeslotRecord {
    pub fn label(&self, locale: &str) -> Option<&str> {
        self.taxonomy_label.get(locale).and_then(|l| l.as_deref())
    }
}

/// Generic taxonomy reference (session type).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyRecord {
    #[serde(default)]
    pub taxonomy_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpeakerRecord {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub asset_to_public_link: Results<PublicLinkRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLinkRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub relative_url: Option<String>,
    #[serde(default)]
    pub version_hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VenueRecord {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_session_deserializes_with_empty_relations() {
        let record: SessionRecord = serde_json::from_value(json!({ "id": "s1" })).unwrap();

        assert_eq!(record.id, "s1");
        assert!(record.name.is_none());
        assert!(record.speakers.results.is_empty());
        assert!(record.timeslot_to_session.results.is_empty());
        assert!(record.first_public_link().is_none());
        assert!(record.day_to_session.is_none());
    }

    #[test]
    fn null_connections_deserialize_as_empty() {
        let record: SessionRecord = serde_json::from_value(json!({
            "id": "s1",
            "sessionToMasterAsset": null,
            "timeslotToSession": { "results": null },
            "speakers": null,
            "room": null
        }))
        .unwrap();

        assert!(record.session_to_master_asset.results.is_empty());
        assert!(record.timeslot_to_session.results.is_empty());
        assert!(record.speakers.results.is_empty());
        assert!(record.room.is_none());
    }

    #[test]
    fn sort_order_accepts_strings_and_numbers() {
        let text: SortOrder = serde_json::from_value(json!("2")).unwrap();
        let number: SortOrder = serde_json::from_value(json!(2)).unwrap();

        assert_eq!(text, number);
        assert_eq!(number.as_key(), Some(2.0));
    }

    #[test]
    fn sort_order_key_is_none_for_non_numeric_values() {
        assert_eq!(SortOrder::new("morning").as_key(), None);
        assert_eq!(SortOrder::new(" 7 ").as_key(), Some(7.0));
        assert_eq!(SortOrder::new("NaN").as_key(), None);
        assert_eq!(SortOrder::new("inf").as_key(), None);
    }

    #[test]
    fn fractional_sort_order_keeps_its_value() {
        let number: SortOrder = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(number.as_key(), Some(1.5));
        assert_eq!(SortOrder::new("2.25").as_key(), Some(2.25));
    }

    #[test]
    fn first_public_link_follows_asset_chain() {
        let record: SessionRecord = serde_json::from_value(json!({
            "id": "s1",
            "sessionToMasterAsset": { "results": [
                { "assetToPublicLink": { "results": [
                    { "relativeUrl": "foo.png", "versionHash": "abc123" },
                    { "relativeUrl": "bar.png", "versionHash": "zzz" }
                ] } },
                { "assetToPublicLink": { "results": [
                    { "relativeUrl": "other.png", "versionHash": "def" }
                ] } }
            ] }
        }))
        .unwrap();

        let link = record.first_public_link().unwrap();
        assert_eq!(link.relative_url.as_deref(), Some("foo.png"));
        assert_eq!(link.version_hash.as_deref(), Some("abc123"));
    }

    #[test]
    fn asset_without_public_links_has_no_first_link() {
        let record: SessionRecord = serde_json::from_value(json!({
            "id": "s1",
            "sessionToMasterAsset": { "results": [ { "assetToPublicLink": { "results": [] } } ] }
        }))
        .unwrap();

        assert!(record.first_public_link().is_none());
    }

    #[test]
    fn timeslot_label_reads_requested_locale() {
        let slot: TimeslotRecord = serde_json::from_value(json!({
            "taxonomyLabel": { "en-US": "9:00 AM", "fr-FR": "9h00", "de-DE": null },
            "sortOrder": "1"
        }))
        .unwrap();

        assert_eq!(slot.label(DISPLAY_LOCALE), Some("9:00 AM"));
        assert_eq!(slot.label("de-DE"), None);
        assert_eq!(slot.label("es-ES"), None);
    }

    #[test]
    fn speaker_names_keep_non_speaker_references_as_none() {
        let record: SessionRecord = serde_json::from_value(json!({
            "id": "s1",
            "speakers": { "results": [ { "name": "Ada" }, {}, { "name": "Grace" } ] }
        }))
        .unwrap();

        assert_eq!(record.speaker_names(), vec![Some("Ada"), None, Some("Grace")]);
    }

    #[test]
    fn session_type_reads_taxonomy_name() {
        let record: SessionRecord = serde_json::from_value(json!({
            "id": "s1",
            "sessionsTypeToSessions": { "taxonomyName": "Keynote" }
        }))
        .unwrap();

        assert_eq!(record.session_type(), Some("Keynote"));
    }
}
