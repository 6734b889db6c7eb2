//! Error codes for the word duel backend.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP problem details and in WebSocket `error` messages.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Identity missing from the request
    Unauthorized,
    /// Identity is not a participant of the session
    NotAParticipant,

    // Request Validation
    /// Generic malformed request
    BadRequest,
    /// Session id is not 4 lowercase letters
    InvalidSessionId,
    /// Guess is not a single letter a-z
    InvalidLetter,

    // Resource Not Found
    /// Session does not exist (or was evicted)
    SessionNotFound,

    // Game Rule Conflicts
    /// Session already has two participants
    SessionFull,
    /// Caller already plays in this session
    AlreadyParticipant,
    /// Letter was guessed before
    AlreadyGuessed,
    /// Session reached its terminal phase
    AlreadyFinished,
    /// Guess submitted by the slot that does not own the turn
    OutOfTurn,
    /// Guess submitted before the second participant joined
    AwaitingOpponent,
    /// Every letter of the word is already revealed
    NoLettersLeft,

    // System Errors
    /// No free session id could be allocated
    IdSpaceExhausted,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidLetter => "INVALID_LETTER",

            Self::SessionNotFound => "SESSION_NOT_FOUND",

            Self::SessionFull => "SESSION_FULL",
            Self::AlreadyParticipant => "ALREADY_PARTICIPANT",
            Self::AlreadyGuessed => "ALREADY_GUESSED",
            Self::AlreadyFinished => "ALREADY_FINISHED",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::AwaitingOpponent => "AWAITING_OPPONENT",
            Self::NoLettersLeft => "NO_LETTERS_LEFT",

            Self::IdSpaceExhausted => "ID_SPACE_EXHAUSTED",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
