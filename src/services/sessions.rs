use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Session;

/// How long a session lives after creation
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Most sessions held at once
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Server-side session store keyed by session id.
///
/// Sessions expire `ttl` after creation and the store never holds more than
/// `max_sessions` entries: expired sessions are purged whenever a new one is
/// created, and the oldest session is evicted when the store is full.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL_SECS, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl_secs: u64, max_sessions: usize) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    fn is_live(&self, session: &Session) -> bool {
        Utc::now().signed_duration_since(session.created_at) < self.ttl
    }

    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        self.inner
            .read()
            .await
            .get(id)
            .filter(|session| self.is_live(session))
            .cloned()
    }

    /// Returns the existing session when `existing` is known to the store and
    /// not expired, otherwise creates a new one. The flag is true when a
    /// session was created.
    pub async fn get_or_create(&self, existing: Option<Uuid>) -> (Session, bool) {
        let mut inner = self.inner.write().await;

        if let Some(session) = existing
            .and_then(|id| inner.get(&id))
            .filter(|session| self.is_live(session))
        {
            return (session.clone(), false);
        }

        let before = inner.len();
        inner.retain(|_, session| self.is_live(session));

        while inner.len() >= self.max_sessions {
            let oldest = inner
                .values()
                .min_by_key(|session| session.created_at)
                .map(|session| session.id);
            match oldest {
                Some(id) => inner.remove(&id),
                None => break,
            };
        }

        let evicted = before - inner.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = inner.len(), "Evicted sessions");
        }

        let session = Session::new();
        inner.insert(session.id, session.clone());
        (session, true)
    }

    pub async fn remove(&self, id: &Uuid) -> Option<Session> {
        self.inner.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
