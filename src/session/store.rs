use super::record::SessionRecord;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Token → username mapping used by the login guard
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for `username` and return it
    async fn create(&self, username: &str) -> SessionRecord;

    /// Look up the session for `token`
    async fn resolve(&self, token: &str) -> Option<SessionRecord>;

    /// End the session for `token`. Returns whether one existed.
    async fn remove(&self, token: &str) -> bool;
}

/// Process-local session store. Sessions are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, username: &str) -> SessionRecord {
        let record = SessionRecord::new(username);

        let mut sessions = self.sessions.write().await;
        sessions.insert(record.token.clone(), record.clone());

        info!("Session started for user: {}", username);

        record
    }

    async fn resolve(&self, token: &str) -> Option<SessionRecord> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    async fn remove(&self, token: &str) -> bool {
        let removed = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(token)
        };

        match removed {
            Some(record) => {
                info!("Session ended for user: {}", record.username);
                true
            }
            None => {
                debug!("Logout for unknown session token");
                false
            }
        }
    }
}
