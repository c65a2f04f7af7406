//! Session store port
//!
//! The engine owns its sessions through an explicit store instead of a
//! process-wide map, so tests get isolated stores and eviction can be
//! plugged in later.
//!
//! Each session sits behind its own async mutex: growth and pagination on
//! one session are serialized while different sessions proceed in
//! parallel. The store-level lock is only held for map lookups.

use chrono::{DateTime, Utc};
use prospect_domain::{SearchSession, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Shared, exclusively-lockable handle to one session
pub type SessionHandle = Arc<AsyncMutex<SearchSession>>;

/// Owner of the live search sessions
pub trait SessionStore: Send + Sync {
    /// Look up an existing session
    fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Return the session keyed by `session.id()`, inserting `session` if
    /// none exists yet. The boolean is true when `session` was inserted.
    fn get_or_insert(&self, session: SearchSession) -> (SessionHandle, bool);

    /// Drop a session. Returns whether it existed.
    fn evict(&self, id: &SessionId) -> bool;

    /// Drop every session not accessed since `cutoff`. Sessions currently
    /// locked by a request are kept. Returns the number evicted.
    fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize;

    /// Number of live sessions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime store backed by a `HashMap`
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, SessionHandle>> {
        // A poisoned map still holds consistent handles; keep serving them.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions().get(id).cloned()
    }

    fn get_or_insert(&self, session: SearchSession) -> (SessionHandle, bool) {
        let mut sessions = self.sessions();
        if let Some(existing) = sessions.get(session.id()) {
            return (Arc::clone(existing), false);
        }
        let id = session.id().clone();
        let handle = Arc::new(AsyncMutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        (handle, true)
    }

    fn evict(&self, id: &SessionId) -> bool {
        self.sessions().remove(id).is_some()
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_accessed_at() >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    fn len(&self) -> usize {
        self.sessions().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospect_domain::PlanningHints;

    fn session(id: &str) -> SearchSession {
        SearchSession::new(SessionId::new(id), "prompt", PlanningHints::default())
    }

    #[test]
    fn test_get_or_insert_reuses_existing() {
        let store = InMemorySessionStore::new();
        let (first, inserted) = store.get_or_insert(session("a"));
        assert!(inserted);
        let (second, inserted) = store.get_or_insert(session("a"));
        assert!(!inserted);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.get(&SessionId::new("missing")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict() {
        let store = InMemorySessionStore::new();
        store.get_or_insert(session("a"));
        assert!(store.evict(&SessionId::new("a")));
        assert!(!store.evict(&SessionId::new("a")));
        assert!(store.get(&SessionId::new("a")).is_none());
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_locked_and_recent_sessions() {
        let store = InMemorySessionStore::new();
        store.get_or_insert(session("idle"));
        let (busy, _) = store.get_or_insert(session("busy"));

        let _guard = busy.lock().await;
        let cutoff = Utc::now() + chrono::Duration::seconds(60);
        assert_eq!(store.evict_idle(cutoff), 1);
        assert!(store.get(&SessionId::new("busy")).is_some());
        assert!(store.get(&SessionId::new("idle")).is_none());
    }
}
