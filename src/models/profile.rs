use serde::{Deserialize, Serialize};

use super::college::College;
use super::id::Id;
use super::location::Location;

/// Identity returned by the "who am I" endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Principal {
    /// A principal without an email is treated as absent.
    pub fn is_present(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

/// Profile attached to a signed-in principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub college: Option<College>,
}
