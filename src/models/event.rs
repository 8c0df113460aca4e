use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::Id;

/// Wire format for event times: local time, no zone.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizerType {
    School,
    Corporate,
}

impl OrganizerType {
    pub const ALL: [&'static str; 2] = ["SCHOOL", "CORPORATE"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizerType::School => "SCHOOL",
            OrganizerType::Corporate => "CORPORATE",
        }
    }
}

impl fmt::Display for OrganizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub location_id: Option<Id>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub creator_id: Option<Id>,
    #[serde(default)]
    pub organizer_type: Option<OrganizerType>,
}

pub fn format_event_time(time: &NaiveDateTime) -> String {
    time.format(EVENT_TIME_FORMAT).to_string()
}
