use serde::{Deserialize, Serialize};

/// A todo entry.
///
/// The `id` is chosen by the client on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
}

impl Item {
    pub fn new(id: i64, title: impl Into<String>, is_completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            is_completed,
        }
    }
}

/// Fields an update is allowed to overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChanges {
    pub title: String,
    pub is_completed: bool,
}

/// Username/password pair presented at login.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
