//! In-memory registry of live dialog sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::conversation::Session;
use crate::domain::foundation::UserId;

/// Shared handle to one user's session.
///
/// The mutex serialises intents from the same user; holders of different
/// handles never block each other.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Maps user identity to that user's session.
///
/// Uses `RwLock` for the map since lookups of existing sessions vastly
/// outnumber first contacts.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<UserId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session handle for a user, if one exists.
    pub async fn get(&self, user_id: UserId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    /// Returns the existing handle or stores the session built by `create`.
    ///
    /// If two first contacts race, the first insert wins and the other
    /// session is discarded.
    pub async fn get_or_insert_with<F>(&self, user_id: UserId, create: F) -> SessionHandle
    where
        F: FnOnce() -> Session,
    {
        if let Some(handle) = self.get(user_id).await {
            return handle;
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(create())))
            .clone()
    }

    /// Copy of a user's current session.
    pub async fn snapshot(&self, user_id: UserId) -> Option<Session> {
        let handle = self.get(user_id).await?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    /// Number of sessions held.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
