use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::{ConnectionContext, GameFlowService};
use crate::domain::session::{Session, Slot};
use crate::domain::snapshot::{SessionSnapshot, StateView};
use crate::domain::SessionId;
use crate::errors::GameError;
use crate::ws::hub::ConnectionSink;
use crate::ws::protocol::Action;

/// Result of a create request, as seen by the creator.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub role: Slot,
    pub state: StateView,
}

impl GameFlowService {
    /// Create a session with `creator` in slot A.
    ///
    /// Non-positive or missing sizes fall back to the configured defaults.
    /// The word is fetched before any lock is taken.
    pub async fn create_session(
        &self,
        creator: &str,
        word_length: Option<i64>,
        max_incorrect: Option<i64>,
        opponent_is_ai: bool,
    ) -> Result<CreatedSession, GameError> {
        let length = positive(word_length)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(self.defaults.word_length);
        let max = positive(max_incorrect)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(self.defaults.max_incorrect);

        let word = self.words.fetch(length).await;
        let entry = self
            .sessions
            .create(|id| Session::new(id, &word, max, creator, opponent_is_ai))?;

        let snapshot = SessionSnapshot::capture(&entry.lock());
        info!(
            session_id = %snapshot.session_id,
            creator,
            vs_ai = opponent_is_ai,
            max_incorrect = max,
            "Session created"
        );

        Ok(CreatedSession {
            session_id: snapshot.session_id.clone(),
            role: Slot::A,
            state: snapshot.view_for(Slot::A),
        })
    }

    /// Seat `joiner` in slot B and tell attached connections the game started.
    pub fn join(&self, session_id: &SessionId, joiner: &str) -> Result<StateView, GameError> {
        let entry = self.sessions.get(session_id)?;
        let snapshot = {
            let mut session = entry.lock();
            session.join(joiner)?;
            SessionSnapshot::capture(&session)
        };
        entry.touch();

        info!(session_id = %session_id, joiner, "Opponent joined");
        self.connections.broadcast(&snapshot, Action::Redirect);
        Ok(snapshot.view_for(Slot::B))
    }

    /// Bind a handshake to a slot. The identity must occupy the claimed slot;
    /// with no claim the slot is derived from the identity.
    pub fn authorize(
        &self,
        user: &str,
        session_id: &SessionId,
        claimed: Option<Slot>,
    ) -> Result<ConnectionContext, GameError> {
        let entry = self.sessions.get(session_id)?;
        let actual = entry.lock().slot_of(user).ok_or(GameError::Forbidden)?;
        if claimed.is_some_and(|role| role != actual) {
            return Err(GameError::Forbidden);
        }
        Ok(ConnectionContext {
            user: user.to_string(),
            session_id: session_id.clone(),
            role: actual,
        })
    }

    /// Attach a live connection and return its initial view.
    ///
    /// The view is captured and the connection registered under the session
    /// lock, so no broadcast can fall between the initial view and the first
    /// update and no older snapshot is sent after it. Registration is undone
    /// if the session was evicted meanwhile.
    pub fn attach(
        &self,
        ctx: &ConnectionContext,
        conn_id: Uuid,
        sink: Arc<dyn ConnectionSink>,
    ) -> Result<StateView, GameError> {
        let entry = self.sessions.get(&ctx.session_id)?;
        entry.touch();
        let snapshot = {
            let session = entry.lock();
            let snapshot = SessionSnapshot::capture(&session);
            self.connections
                .register(&ctx.session_id, conn_id, ctx.role, sink, snapshot.version);
            snapshot
        };

        if !self.sessions.contains(&ctx.session_id) {
            self.connections.deregister(&ctx.session_id, conn_id);
            return Err(GameError::NotFound(ctx.session_id.clone()));
        }
        Ok(snapshot.view_for(ctx.role))
    }

    pub fn detach(&self, ctx: &ConnectionContext, conn_id: Uuid) {
        self.connections.deregister(&ctx.session_id, conn_id);
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}
