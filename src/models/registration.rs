use serde::{Deserialize, Serialize};

use super::id::Id;

/// Join record linking a user to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub id: Option<Id>,
    pub event_id: Id,
    pub user_id: Id,
}
