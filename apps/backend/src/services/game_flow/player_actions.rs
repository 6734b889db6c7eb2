use tracing::{debug, info, warn};

use super::{ConnectionContext, GameFlowService};
use crate::domain::player_view::AdvisorView;
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::SessionId;
use crate::errors::GameError;
use crate::ws::protocol::Action;

/// What an accepted guess led to.
#[derive(Debug, Clone)]
pub struct GuessReport {
    pub snapshot: SessionSnapshot,
    /// Connections that received the resulting broadcast.
    pub delivered: usize,
}

impl GameFlowService {
    /// Submit a guess on behalf of the connection's bound slot.
    ///
    /// Every rejection returns before anything is mutated or broadcast. On
    /// acceptance, a pending computer move is played too, a freshly finished
    /// game with a human winner is recorded in the ledger, and the session is
    /// broadcast exactly once.
    pub async fn submit_guess(
        &self,
        ctx: &ConnectionContext,
        raw: &str,
    ) -> Result<GuessReport, GameError> {
        let entry = self.sessions.get(&ctx.session_id)?;
        entry.touch();

        let (mut finished, ai_view) = {
            let mut session = entry.lock();
            session.ensure_can_guess(ctx.role)?;
            let outcome = session.apply_guess(raw)?;
            debug!(
                session_id = %ctx.session_id,
                role = ?ctx.role,
                letter = %outcome.letter,
                correct = outcome.correct,
                "Guess applied"
            );
            let ai_view = session
                .is_ai_turn()
                .then(|| AdvisorView::from_session(&session));
            (outcome.finished, ai_view)
        };

        if let Some(view) = ai_view {
            finished |= self.play_ai_turn(&entry, &view).await;
        }

        let (snapshot, ranked) = {
            let session = entry.lock();
            let ranked = session
                .ranked_winner()
                .map(|winner| (winner.to_string(), session.incorrect_count()));
            (SessionSnapshot::capture(&session), ranked)
        };

        if finished {
            info!(
                session_id = %ctx.session_id,
                winner = snapshot.winner.as_deref().unwrap_or_default(),
                "Session finished"
            );
            if let Some((winner, incorrect)) = ranked {
                if let Err(err) = self.ledger.record_win(&winner, incorrect).await {
                    warn!(error = %err, winner = %winner, "Failed to record win");
                }
            }
        }

        let delivered = self.connections.broadcast(&snapshot, Action::State);
        Ok(GuessReport {
            snapshot,
            delivered,
        })
    }

    /// Issue the session's single hint to a participant. Not broadcast.
    pub fn issue_hint(&self, session_id: &SessionId, user: &str) -> Result<String, GameError> {
        let entry = self.sessions.get(session_id)?;
        let hint = {
            let mut session = entry.lock();
            session.slot_of(user).ok_or(GameError::Forbidden)?;
            session.issue_hint()?
        };
        entry.touch();
        Ok(hint)
    }
}
