use serde::{Deserialize, Serialize};

use crate::record::empty_as_none;

/// Signed-in account as returned by the backend's current-user lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<String>,
}
