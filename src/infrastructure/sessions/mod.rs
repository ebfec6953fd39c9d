//! In-memory session store
//!
//! The naive map the system was specified with: unbounded, process-local,
//! gone on restart. It sits behind the `SessionStore` trait so a bounded or
//! TTL-backed store can replace it without touching the conversation core.
//! The mutex also serializes access if the polling loop ever grows
//! concurrent dispatch.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::Session;
use crate::domain::traits::SessionStore;

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<i64, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: i64) -> Option<Session> {
        self.sessions.lock().unwrap().get(&user_id).cloned()
    }

    fn set(&self, user_id: i64, session: Session) {
        self.sessions.lock().unwrap().insert(user_id, session);
    }

    fn remove(&self, user_id: i64) {
        self.sessions.lock().unwrap().remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionState;

    #[test]
    fn set_overwrites_whole_session() {
        let store = InMemorySessionStore::new();
        store.set(1, Session::selecting_amount("alice"));
        store.set(1, Session::welcome("alice"));
        assert_eq!(store.get(1).unwrap().state, SessionState::Welcome);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_or_default_creates_fresh_session_for_unseen_user() {
        let store = InMemorySessionStore::new();
        let session = store.get_or_default(7);
        assert_eq!(session.state, SessionState::Welcome);
        // Reading does not insert.
        assert!(store.get(7).is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = InMemorySessionStore::new();
        store.set(1, Session::welcome("alice"));
        store.remove(1);
        store.remove(1);
        assert!(store.is_empty());
    }
}
