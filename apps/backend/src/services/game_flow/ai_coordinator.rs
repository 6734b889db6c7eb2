use tracing::{debug, warn};

use super::GameFlowService;
use crate::ai::fallback_letter;
use crate::domain::player_view::AdvisorView;
use crate::services::sessions::SessionEntry;

impl GameFlowService {
    /// Play the computer's move after a human guess.
    ///
    /// The advisor runs without the session lock. Once it answers, the lock
    /// is re-taken and the turn re-validated, since the session may have
    /// moved on meanwhile. A suggestion that became stale is swapped for the
    /// frequency fallback.
    ///
    /// Returns true if this move finished the game.
    pub(super) async fn play_ai_turn(&self, entry: &SessionEntry, view: &AdvisorView) -> bool {
        let suggestion = self.advisor.next_letter(view).await;

        let mut session = entry.lock();
        if !session.is_ai_turn() {
            debug!(session_id = %session.id(), "Computer turn no longer pending, skipping");
            return false;
        }

        let letter = match suggestion {
            Some(letter) if !session.has_guessed(letter) => Some(letter),
            _ => fallback_letter(&AdvisorView::from_session(&session)),
        };
        let Some(letter) = letter else {
            warn!(session_id = %session.id(), "No letter left for the computer");
            return false;
        };

        match session.apply_guess(&letter.to_string()) {
            Ok(outcome) => {
                debug!(
                    session_id = %session.id(),
                    letter = %letter,
                    correct = outcome.correct,
                    "Computer guess applied"
                );
                outcome.finished
            }
            Err(err) => {
                warn!(session_id = %session.id(), error = %err, "Computer guess rejected");
                false
            }
        }
    }
}
