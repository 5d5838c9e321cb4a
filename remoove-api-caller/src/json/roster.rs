use serde::{Deserialize, Serialize};

use super::ids::deserialize_id;

/// One entry of the `/Home` roster
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(alias = "trashCanId", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
