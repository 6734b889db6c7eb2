//! Session registry: concurrent map from session id to live session.
//!
//! Each entry carries its own mutex, so guesses on one session serialize
//! while unrelated sessions proceed in parallel. The map itself is a
//! `DashMap`; its shard locks are held only for lookups and inserts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::domain::session::Session;
use crate::domain::SessionId;
use crate::errors::GameError;
use crate::ws::hub::ConnectionRegistry;

/// Attempts at drawing an unused id before giving up.
pub const MAX_ID_ATTEMPTS: usize = 64;

pub struct SessionEntry {
    session: Mutex<Session>,
    last_active: Mutex<Instant>,
}

impl SessionEntry {
    fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
            last_active: Mutex::new(Instant::now()),
        }
    }

    /// Lock the session for one logical read-modify-write.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock()
    }

    pub fn touch(&self) {
        *self.last_active.lock() = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.lock().elapsed()
    }
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<SessionEntry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session under a freshly generated, unused id.
    pub fn create<F>(&self, build: F) -> Result<Arc<SessionEntry>, GameError>
    where
        F: FnOnce(SessionId) -> Session,
    {
        self.create_with(SessionId::generate, build)
    }

    /// Like `create`, with the id generator injected. A generated id that is
    /// already taken is discarded and a new one drawn.
    pub fn create_with<G, F>(&self, mut next_id: G, build: F) -> Result<Arc<SessionEntry>, GameError>
    where
        G: FnMut() -> SessionId,
        F: FnOnce(SessionId) -> Session,
    {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = next_id();
            match self.sessions.entry(id.clone()) {
                Entry::Occupied(_) => {
                    warn!(session_id = %id, "Session id collision, regenerating");
                }
                Entry::Vacant(slot) => {
                    let entry = Arc::new(SessionEntry::new(build(id)));
                    slot.insert(entry.clone());
                    return Ok(entry);
                }
            }
        }
        Err(GameError::IdSpaceExhausted)
    }

    pub fn get(&self, id: &SessionId) -> Result<Arc<SessionEntry>, GameError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GameError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `ttl` that have no attached
    /// connections. Returns the evicted ids.
    pub fn evict_idle(&self, ttl: Duration, connections: &ConnectionRegistry) -> Vec<SessionId> {
        let candidates: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|e| e.value().idle_for() > ttl)
            .map(|e| e.key().clone())
            .collect();

        let mut evicted = Vec::new();
        for id in candidates {
            // Re-check under the shard lock; a guess or an attach may have
            // landed since the scan.
            let removed = self.sessions.remove_if(&id, |id, entry| {
                entry.idle_for() > ttl && !connections.has_connections(id)
            });
            if removed.is_some() {
                info!(session_id = %id, "Evicted idle session");
                evicted.push(id);
            }
        }
        evicted
    }
}
