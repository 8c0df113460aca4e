use serde::{Deserialize, Serialize};

use super::id::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub id: Id,
    pub name: String,
}
