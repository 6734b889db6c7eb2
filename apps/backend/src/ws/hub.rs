//! Connection registry and broadcaster.
//!
//! Tracks, per session, the live connections attached to it. Every mutation
//! (register, deregister, pruning during a broadcast) happens under one
//! map-wide lock, so a broadcast never sees a half-updated connection list.
//! This lock is independent of the per-session state lock: broadcasts work
//! from a `SessionSnapshot` copied out beforehand.

use std::collections::HashMap;
use std::sync::Arc;

use actix::prelude::SendError;
use actix::Message;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::session::Slot;
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::SessionId;
use crate::ws::protocol::{Action, ServerMsg};

/// Serialized frame pushed to one connection.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct OutboundFrame(pub String);

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("connection closed")]
    Closed,
    #[error("connection mailbox full")]
    Full,
}

impl<M> From<SendError<M>> for DeliveryError {
    fn from(err: SendError<M>) -> Self {
        match err {
            SendError::Full(_) => DeliveryError::Full,
            SendError::Closed(_) => DeliveryError::Closed,
        }
    }
}

/// Non-blocking write side of one connection.
pub trait ConnectionSink: Send + Sync {
    fn deliver(&self, frame: OutboundFrame) -> Result<(), DeliveryError>;

    /// Shut the connection down after it was pruned while still open.
    fn evict(&self) {}
}

struct Attached {
    conn_id: Uuid,
    role: Slot,
    sink: Arc<dyn ConnectionSink>,
}

/// Connections of one session plus the newest snapshot version they were sent.
#[derive(Default)]
struct Audience {
    last_version: u64,
    conns: Vec<Attached>,
}

#[derive(Default)]
pub struct ConnectionRegistry {
    sessions: Mutex<HashMap<SessionId, Audience>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection whose initial view was built from snapshot
    /// `seen_version`. Broadcasts older than that are no longer sent.
    pub fn register(
        &self,
        session_id: &SessionId,
        conn_id: Uuid,
        role: Slot,
        sink: Arc<dyn ConnectionSink>,
        seen_version: u64,
    ) {
        let mut sessions = self.sessions.lock();
        let audience = sessions.entry(session_id.clone()).or_default();
        audience.last_version = audience.last_version.max(seen_version);
        audience.conns.push(Attached {
            conn_id,
            role,
            sink,
        });
        debug!(session_id = %session_id, conn_id = %conn_id, role = ?role, "[WS HUB] registered");
    }

    /// Remove one connection. Drops the session's set once it is empty.
    pub fn deregister(&self, session_id: &SessionId, conn_id: Uuid) {
        let mut sessions = self.sessions.lock();
        if let Some(audience) = sessions.get_mut(session_id) {
            audience.conns.retain(|c| c.conn_id != conn_id);
            if audience.conns.is_empty() {
                sessions.remove(session_id);
            }
        }
        debug!(session_id = %session_id, conn_id = %conn_id, "[WS HUB] deregistered");
    }

    /// Send each attached connection its role-scoped view of `snapshot`.
    ///
    /// A failed write prunes that connection on the spot; it is never retried
    /// and the remaining connections are still served. A connection whose
    /// mailbox is full is also told to shut down. Snapshots older than the
    /// last one sent for the session are dropped. Returns how many
    /// connections received the frame.
    pub fn broadcast(&self, snapshot: &SessionSnapshot, action: Action) -> usize {
        let session_id = &snapshot.session_id;
        let mut frames: HashMap<Slot, String> = HashMap::new();
        let mut sessions = self.sessions.lock();

        let Some(audience) = sessions.get_mut(session_id) else {
            return 0;
        };

        if snapshot.version < audience.last_version {
            debug!(
                session_id = %session_id,
                version = snapshot.version,
                last_version = audience.last_version,
                "[WS HUB] dropping stale snapshot"
            );
            return 0;
        }
        audience.last_version = snapshot.version;

        let mut delivered = 0;
        audience.conns.retain(|conn| {
            let frame = match frames.get(&conn.role) {
                Some(frame) => frame.clone(),
                None => {
                    let msg = ServerMsg::with_state(
                        session_id.clone(),
                        action,
                        snapshot.view_for(conn.role),
                    );
                    match serde_json::to_string(&msg) {
                        Ok(text) => {
                            frames.insert(conn.role, text.clone());
                            text
                        }
                        Err(err) => {
                            warn!(error = %err, "[WS HUB] failed to serialize broadcast");
                            return true;
                        }
                    }
                }
            };

            match conn.sink.deliver(OutboundFrame(frame)) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(err) => {
                    info!(
                        session_id = %session_id,
                        conn_id = %conn.conn_id,
                        error = %err,
                        "[WS HUB] pruning dead connection"
                    );
                    if matches!(err, DeliveryError::Full) {
                        conn.sink.evict();
                    }
                    false
                }
            }
        });

        if audience.conns.is_empty() {
            sessions.remove(session_id);
        }
        delivered
    }

    pub fn has_connections(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().contains_key(session_id)
    }

    pub fn connection_count(&self, session_id: &SessionId) -> usize {
        self.sessions
            .lock()
            .get(session_id)
            .map_or(0, |audience| audience.conns.len())
    }

    /// Total live connections across all sessions.
    pub fn active_connections_count(&self) -> usize {
        self.sessions
            .lock()
            .values()
            .map(|audience| audience.conns.len())
            .sum()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
