use serde::{Deserialize, Serialize};

use super::id::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Id,
    pub name: String,
}
