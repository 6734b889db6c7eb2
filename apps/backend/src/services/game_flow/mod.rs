//! Game flow orchestration service - bridges the session state machine with
//! the registries, the advisor, the ledger and the broadcaster.
//!
//! Transport-agnostic: HTTP routes and the WebSocket actor both call into
//! `GameFlowService`, and only translate its `GameError`s.

mod ai_coordinator;
mod player_actions;
mod seats;

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{LedgerEntry, LedgerError, RankedLedger, WordSource};
use crate::ai::GuessAdvisor;
use crate::domain::session::Slot;
use crate::domain::snapshot::{SessionSnapshot, StateView};
use crate::domain::SessionId;
use crate::errors::GameError;
use crate::services::sessions::SessionRegistry;
use crate::ws::hub::ConnectionRegistry;

pub use player_actions::GuessReport;
pub use seats::CreatedSession;

/// Create-request defaults for unset or non-positive values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDefaults {
    pub word_length: usize,
    pub max_incorrect: u32,
}

impl Default for GameDefaults {
    fn default() -> Self {
        Self {
            word_length: 5,
            max_incorrect: 7,
        }
    }
}

/// Authenticated context of one connection, fixed at handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    pub user: String,
    pub session_id: SessionId,
    pub role: Slot,
}

pub struct GameFlowService {
    sessions: Arc<SessionRegistry>,
    connections: Arc<ConnectionRegistry>,
    advisor: GuessAdvisor,
    ledger: Arc<dyn RankedLedger>,
    words: Arc<dyn WordSource>,
    defaults: GameDefaults,
}

impl GameFlowService {
    pub fn new(
        sessions: Arc<SessionRegistry>,
        connections: Arc<ConnectionRegistry>,
        advisor: GuessAdvisor,
        ledger: Arc<dyn RankedLedger>,
        words: Arc<dyn WordSource>,
        defaults: GameDefaults,
    ) -> Self {
        Self {
            sessions,
            connections,
            advisor,
            ledger,
            words,
            defaults,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub fn connections(&self) -> &Arc<ConnectionRegistry> {
        &self.connections
    }

    /// The view `role` would receive right now.
    pub fn view_for(&self, session_id: &SessionId, role: Slot) -> Result<StateView, GameError> {
        let entry = self.sessions.get(session_id)?;
        entry.touch();
        let snapshot = SessionSnapshot::capture(&entry.lock());
        Ok(snapshot.view_for(role))
    }

    /// The view of whichever slot `user` occupies; `Forbidden` for outsiders.
    pub fn view_for_user(&self, session_id: &SessionId, user: &str) -> Result<StateView, GameError> {
        let entry = self.sessions.get(session_id)?;
        let session = entry.lock();
        let role = session.slot_of(user).ok_or(GameError::Forbidden)?;
        Ok(SessionSnapshot::capture(&session).view_for(role))
    }

    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<LedgerEntry>, LedgerError> {
        self.ledger.top(limit).await
    }

    pub fn evict_idle(&self, ttl: Duration) -> Vec<SessionId> {
        self.sessions.evict_idle(ttl, &self.connections)
    }
}
