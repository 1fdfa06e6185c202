use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as SessionLock, OwnedMutexGuard};

use crate::types::{Session, SessionId};

pub type SessionGuard = OwnedMutexGuard<Session>;

/// In-memory sessions keyed by session id.
///
/// Each session sits behind its own async lock, so work on one session is
/// serialized while different sessions proceed in parallel. The outer map lock
/// is only held to find or insert a slot, never across an await.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<SessionId, Arc<SessionLock<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    fn slot(&self, session_id: &str) -> Arc<SessionLock<Session>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(SessionLock::new(Session::new(session_id))))
            .clone()
    }

    /// Exclusive access to a session, creating an idle one if none exists.
    /// Call [`SessionStore::release`] after dropping the guard.
    pub async fn lock(&self, session_id: &str) -> SessionGuard {
        self.slot(session_id).lock_owned().await
    }

    /// Drops the slot of an idle session nobody else is using.
    pub fn release(&self, session_id: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let unused = slots.get(session_id).map_or(false, |slot| {
            Arc::strong_count(slot) == 1
                && slot.try_lock().map_or(false, |session| session.is_idle())
        });
        if unused {
            slots.remove(session_id);
        }
    }

    pub async fn get(&self, session_id: &str) -> Session {
        let session = self.lock(session_id).await.clone();
        self.release(session_id);
        session
    }

    pub async fn put(&self, session: Session) {
        let session_id = session.id.clone();
        {
            let mut guard = self.lock(&session_id).await;
            *guard = session;
        }
        self.release(&session_id);
    }

    pub async fn clear(&self, session_id: &str) {
        {
            let mut guard = self.lock(session_id).await;
            *guard = Session::new(session_id);
        }
        self.release(session_id);
    }

    /// Number of sessions currently held in memory.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
