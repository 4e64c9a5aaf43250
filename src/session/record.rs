use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged-in user's session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque token handed to the browser
    pub token: String,

    /// Username chosen at login
    pub username: String,

    /// When the user logged in
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}
