//! Schedule domain module.
//!
//! Turns nested CMS session records into the flat, ordered session list
//! shown on the conference schedule display.

mod errors;
pub mod records;
mod session;

pub use errors::ScheduleError;
pub use records::{
    AssetRecord, DayRecord, PublicLinkRecord, Results, RoomRecord, SessionRecord, SortOrder,
    SpeakerRecord, TaxonomyRecord, TimeslotRecord, VenueRecord, DISPLAY_LOCALE,
};
pub use session::{
    format_speakers, project_session, sort_sessions, Day, Room, Session, SessionCollector,
    Timeslot, MISSING_ASSET_SEGMENT,
};
