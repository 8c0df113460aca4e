use serde::{Deserialize, Serialize};

use super::id::Id;

/// A user as returned by `/api/users`.
///
/// The backend's read shape carries display names for location and college
/// while the write shape uses ids, so both are optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub location_id: Option<Id>,
    #[serde(default)]
    pub college_id: Option<Id>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub events_count: Option<u32>,
}
