//! Domain-level error type used by the session state machine and services.
//!
//! This error type is HTTP- and transport-agnostic. Route handlers convert it
//! into `crate::error::AppError`; the WebSocket handler converts it into a
//! private `error` message for the originating connection only.

use thiserror::Error;

use crate::domain::session_id::SessionId;
use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error("session already has two participants")]
    AlreadyFull,
    #[error("you are already a participant in this session")]
    AlreadyParticipant,
    #[error("authentication required")]
    Unauthorized,
    #[error("not a participant of this session")]
    Forbidden,
    #[error("'{0}' is not a single letter a-z")]
    InvalidLetter(String),
    #[error("Letter '{0}' has already been guessed.")]
    AlreadyGuessed(char),
    #[error("the game is already finished")]
    AlreadyFinished,
    #[error("it is not your turn")]
    OutOfTurn,
    #[error("waiting for an opponent to join")]
    AwaitingOpponent,
    #[error("no unguessed letters left")]
    NoLettersLeft,
    #[error("invalid session id '{0}'")]
    InvalidSessionId(String),
    #[error("could not allocate a free session id")]
    IdSpaceExhausted,
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::NotFound(_) => ErrorCode::SessionNotFound,
            GameError::AlreadyFull => ErrorCode::SessionFull,
            GameError::AlreadyParticipant => ErrorCode::AlreadyParticipant,
            GameError::Unauthorized => ErrorCode::Unauthorized,
            GameError::Forbidden => ErrorCode::NotAParticipant,
            GameError::InvalidLetter(_) => ErrorCode::InvalidLetter,
            GameError::AlreadyGuessed(_) => ErrorCode::AlreadyGuessed,
            GameError::AlreadyFinished => ErrorCode::AlreadyFinished,
            GameError::OutOfTurn => ErrorCode::OutOfTurn,
            GameError::AwaitingOpponent => ErrorCode::AwaitingOpponent,
            GameError::NoLettersLeft => ErrorCode::NoLettersLeft,
            GameError::InvalidSessionId(_) => ErrorCode::InvalidSessionId,
            GameError::IdSpaceExhausted => ErrorCode::IdSpaceExhausted,
        }
    }
}
