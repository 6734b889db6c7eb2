//! Session state machine.
//!
//! One `Session` is one guessing match between slot A (the creator) and slot B
//! (a second human or the computer). All mutation goes through `join`,
//! `apply_guess` and `issue_hint`; callers serialize those calls with the
//! per-session lock held by the registry.

use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::session_id::SessionId;
use crate::errors::domain::GameError;

/// Identity of the automated opponent.
pub const AI_NAME: &str = "Computer";
/// Winner label for a game that ran out of guesses.
pub const DRAW: &str = "Draw";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Accepts the wire tags "A"/"B" and the legacy numeric tags "1"/"2".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" | "a" | "1" => Some(Slot::A),
            "B" | "b" | "2" => Some(Slot::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participant {
    Human(String),
    Ai,
}

impl Participant {
    pub fn name(&self) -> &str {
        match self {
            Participant::Human(name) => name,
            Participant::Ai => AI_NAME,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Participant::Ai)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Slot),
    Draw,
}

/// Lifecycle of a session. The winner lives inside `Finished`, so a winner
/// exists exactly when the phase is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingOpponent,
    InProgress,
    Finished(Outcome),
}

impl Phase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::AwaitingOpponent => "awaiting_opponent",
            Phase::InProgress => "in_progress",
            Phase::Finished(_) => "finished",
        }
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub letter: char,
    pub correct: bool,
    /// True when this guess moved the session into `Finished`.
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    secret_word: String,
    guessed: BTreeSet<char>,
    history: Vec<char>,
    incorrect: u32,
    max_incorrect: u32,
    participant_a: String,
    participant_b: Option<Participant>,
    turn: Slot,
    phase: Phase,
    hint: Option<String>,
    version: u64,
}

impl Session {
    /// Start a new session. Against the computer the game starts immediately;
    /// otherwise it waits for a second human to `join`.
    pub fn new(
        id: SessionId,
        secret_word: &str,
        max_incorrect: u32,
        creator: impl Into<String>,
        opponent_is_ai: bool,
    ) -> Self {
        let (participant_b, phase) = if opponent_is_ai {
            (Some(Participant::Ai), Phase::InProgress)
        } else {
            (None, Phase::AwaitingOpponent)
        };

        Self {
            id,
            secret_word: secret_word.trim().to_lowercase(),
            guessed: BTreeSet::new(),
            history: Vec::new(),
            incorrect: 0,
            max_incorrect: max_incorrect.max(1),
            participant_a: creator.into(),
            participant_b,
            turn: Slot::A,
            phase,
            hint: None,
            version: 0,
        }
    }

    pub fn join(&mut self, joiner: &str) -> Result<(), GameError> {
        if self.participant_b.is_some() {
            return Err(GameError::AlreadyFull);
        }
        if joiner == self.participant_a {
            return Err(GameError::AlreadyParticipant);
        }
        self.participant_b = Some(Participant::Human(joiner.to_string()));
        self.phase = Phase::InProgress;
        self.version += 1;
        Ok(())
    }

    /// Apply one guess for whichever slot owns the turn.
    ///
    /// Rejections leave the session untouched. The win check runs before the
    /// loss check, and the turn only passes when neither ended the game.
    pub fn apply_guess(&mut self, raw: &str) -> Result<GuessOutcome, GameError> {
        if self.phase.is_finished() {
            return Err(GameError::AlreadyFinished);
        }
        let letter = parse_letter(raw)?;
        if self.guessed.contains(&letter) {
            return Err(GameError::AlreadyGuessed(letter));
        }

        self.guessed.insert(letter);
        self.history.push(letter);

        let correct = self.secret_word.contains(letter);
        if !correct {
            self.incorrect += 1;
        }

        if self.is_fully_revealed() {
            self.phase = Phase::Finished(Outcome::Won(self.turn));
        } else if self.incorrect >= self.max_incorrect {
            self.phase = Phase::Finished(Outcome::Draw);
        } else {
            self.turn = self.turn.other();
        }
        self.version += 1;

        Ok(GuessOutcome {
            letter,
            correct,
            finished: self.phase.is_finished(),
        })
    }

    /// Suggest one unguessed letter of the word. Only the first call picks a
    /// letter; later calls return the cached text. The hint is advisory and
    /// never marks the letter as guessed.
    pub fn issue_hint(&mut self) -> Result<String, GameError> {
        self.issue_hint_with(&mut rand::rng())
    }

    pub fn issue_hint_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, GameError> {
        if let Some(text) = &self.hint {
            return Ok(text.clone());
        }

        let unguessed: Vec<char> = self
            .secret_word
            .chars()
            .filter(|c| !self.guessed.contains(c))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let letter = *unguessed.choose(rng).ok_or(GameError::NoLettersLeft)?;
        let text = format!("Try the letter '{letter}'.");
        self.hint = Some(text.clone());
        self.version += 1;
        Ok(text)
    }

    /// Guard for the connection boundary: only the turn owner of a running
    /// game may guess.
    pub fn ensure_can_guess(&self, role: Slot) -> Result<(), GameError> {
        match self.phase {
            Phase::Finished(_) => Err(GameError::AlreadyFinished),
            Phase::AwaitingOpponent => Err(GameError::AwaitingOpponent),
            Phase::InProgress if role != self.turn => Err(GameError::OutOfTurn),
            Phase::InProgress => Ok(()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Bumped by every accepted mutation; orders snapshots of this session.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    pub fn guess_history(&self) -> &[char] {
        &self.history
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect
    }

    pub fn max_incorrect(&self) -> u32 {
        self.max_incorrect
    }

    pub fn remaining_guesses(&self) -> u32 {
        self.max_incorrect.saturating_sub(self.incorrect)
    }

    pub fn turn(&self) -> Slot {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn participant_a(&self) -> &str {
        &self.participant_a
    }

    pub fn participant_b(&self) -> Option<&Participant> {
        self.participant_b.as_ref()
    }

    pub fn participant_name(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::A => Some(&self.participant_a),
            Slot::B => self.participant_b.as_ref().map(Participant::name),
        }
    }

    /// Which slot a human identity occupies, if any.
    pub fn slot_of(&self, identity: &str) -> Option<Slot> {
        if identity == self.participant_a {
            return Some(Slot::A);
        }
        match &self.participant_b {
            Some(Participant::Human(name)) if name == identity => Some(Slot::B),
            _ => None,
        }
    }

    pub fn opponent_is_ai(&self) -> bool {
        self.participant_b.as_ref().is_some_and(Participant::is_ai)
    }

    pub fn is_ai_turn(&self) -> bool {
        self.phase == Phase::InProgress && self.turn == Slot::B && self.opponent_is_ai()
    }

    /// Winner identity, or `DRAW`; `None` while the game is running.
    pub fn winner(&self) -> Option<&str> {
        match self.phase {
            Phase::Finished(Outcome::Won(slot)) => self.participant_name(slot),
            Phase::Finished(Outcome::Draw) => Some(DRAW),
            _ => None,
        }
    }

    /// The human winner of a finished game, for the ranked ledger.
    pub fn ranked_winner(&self) -> Option<&str> {
        match self.phase {
            Phase::Finished(Outcome::Won(Slot::A)) => Some(&self.participant_a),
            Phase::Finished(Outcome::Won(Slot::B)) => match &self.participant_b {
                Some(Participant::Human(name)) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn hint_text(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.secret_word.chars().all(|c| self.guessed.contains(&c))
    }

    pub fn display_word(&self) -> String {
        display_word(&self.secret_word, &self.guessed)
    }

    pub fn correct_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| self.secret_word.contains(*c))
            .collect()
    }

    pub fn wrong_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.secret_word.contains(*c))
            .collect()
    }
}

/// Normalise a guess candidate: trimmed, lowercased, exactly one letter a-z.
pub fn parse_letter(raw: &str) -> Result<char, GameError> {
    let normalized = raw.trim().to_lowercase();
    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Ok(c),
        _ => Err(GameError::InvalidLetter(raw.to_string())),
    }
}

/// Reveal guessed characters, mask the rest with `_`, blank-separated.
pub fn display_word(secret_word: &str, guessed: &BTreeSet<char>) -> String {
    secret_word
        .chars()
        .map(|c| if guessed.contains(&c) { c } else { '_' })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}
