//! Public snapshot API for observing session state without exposing internals.
//!
//! A `SessionSnapshot` is copied out while the session lock is held and then
//! published without it. `StateView` is the role-scoped rendering sent to one
//! connection.

use serde::{Deserialize, Serialize};

use crate::domain::session::{Phase, Session, Slot};
use crate::domain::session_id::SessionId;

/// Everything a broadcast needs, detached from the live session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub display_word: String,
    pub remaining: u32,
    pub correct: Vec<char>,
    pub wrong: Vec<char>,
    pub phase: Phase,
    pub turn: Slot,
    pub winner: Option<String>,
    pub player_a: String,
    pub player_b: Option<String>,
    pub last_guess: Option<char>,
    pub hint_used: bool,
    pub secret_word: String,
    /// Session version this was captured at.
    pub version: u64,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            session_id: session.id().clone(),
            display_word: session.display_word(),
            remaining: session.remaining_guesses(),
            correct: session.correct_letters(),
            wrong: session.wrong_letters(),
            phase: session.phase(),
            turn: session.turn(),
            winner: session.winner().map(str::to_string),
            player_a: session.participant_a().to_string(),
            player_b: session.participant_name(Slot::B).map(str::to_string),
            last_guess: session.guess_history().last().copied(),
            hint_used: session.hint_text().is_some(),
            secret_word: session.secret_word().to_string(),
            version: session.version(),
        }
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_finished()
    }

    /// Render the view seen by the holder of `role`.
    pub fn view_for(&self, role: Slot) -> StateView {
        let game_over = self.game_over();
        StateView {
            display_word: self.display_word.clone(),
            remaining: self.remaining,
            correct: self.correct.clone(),
            wrong: self.wrong.clone(),
            game_over,
            winner: self.winner.clone(),
            is_your_turn: self.phase == Phase::InProgress && self.turn == role,
            your_role: role,
            phase: self.phase.label().to_string(),
            player_a: self.player_a.clone(),
            player_b: self.player_b.clone(),
            last_guess: self.last_guess,
            hint_used: self.hint_used,
            word: game_over.then(|| self.secret_word.clone()),
        }
    }
}

/// Per-recipient state payload of an outbound `state` message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    pub display_word: String,
    pub remaining: u32,
    pub correct: Vec<char>,
    pub wrong: Vec<char>,
    pub game_over: bool,
    pub winner: Option<String>,
    pub is_your_turn: bool,
    pub your_role: Slot,
    pub phase: String,
    pub player_a: String,
    pub player_b: Option<String>,
    pub last_guess: Option<char>,
    pub hint_used: bool,
    /// Revealed only once the game is over.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub word: Option<String>,
}
