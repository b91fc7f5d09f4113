//! Session Schedule - Conference schedule projection over a headless CMS.
//!
//! Queries the CMS GraphQL delivery API for a room's or a day's sessions and
//! flattens the nested content records into an ordered list of display
//! sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
