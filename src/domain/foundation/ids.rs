//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Opaque CMS record identifier of a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a new RoomId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("room_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Largest day index the CMS accepts; the day filter is a GraphQL `Int`.
pub const MAX_DAY_INDEX: u32 = i32::MAX as u32;

/// Zero-based index of a conference day.
///
/// The CMS stores the same value as the day taxonomy's sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayIndex(u32);

impl DayIndex {
    /// Creates a DayIndex, returning error above [`MAX_DAY_INDEX`].
    pub fn new(index: u32) -> Result<Self, ValidationError> {
        if index > MAX_DAY_INDEX {
            return Err(ValidationError::out_of_range("day", 0, MAX_DAY_INDEX, index));
        }
        Ok(Self(index))
    }

    /// Returns the raw index.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Human label shown for the day, one-based ("Day 1" for index 0).
    pub fn label(&self) -> String {
        format!("Day {}", u64::from(self.0) + 1)
    }

    /// The day taxonomy sort order this index corresponds to.
    pub fn sort_order(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<u32> for DayIndex {
    type Error = ValidationError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl FromStr for DayIndex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .trim()
            .parse::<u32>()
            .map_err(|e| ValidationError::invalid_format("day", e.to_string()))?;
        Self::new(index)
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
