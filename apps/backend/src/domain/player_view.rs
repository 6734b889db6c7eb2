//! What the automated opponent can see at its decision point.
//!
//! Copied out of the session under the lock so the advisor can run without
//! holding it. The secret word is never part of this view.

use std::collections::BTreeSet;

use crate::domain::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorView {
    /// Revealed pattern, e.g. `_ p p _ e`.
    pub display_word: String,
    pub guessed: BTreeSet<char>,
}

impl AdvisorView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            display_word: session.display_word(),
            guessed: session.guessed_letters().clone(),
        }
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    /// Guessed letters as `a, b, c` in alphabetical order.
    pub fn guessed_list(&self) -> String {
        self.guessed
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
