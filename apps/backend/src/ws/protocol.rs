use serde::{Deserialize, Serialize};

use crate::domain::snapshot::StateView;
use crate::domain::SessionId;
use crate::errors::GameError;

/// The only inbound action this server acts on.
pub const GUESS_ACTION: &str = "guess";

/// Inbound frame. `session_id` is accepted for compatibility but ignored:
/// the session and role bound at handshake are authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientMsg {
    #[serde(default, alias = "game_id")]
    pub session_id: Option<String>,
    pub action: String,
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    State,
    Error,
    Redirect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMsg {
    pub session_id: SessionId,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateView>,
}

impl ServerMsg {
    pub fn with_state(session_id: SessionId, action: Action, state: StateView) -> Self {
        let payload = match action {
            Action::Redirect => "game_started".to_string(),
            _ => String::new(),
        };
        Self {
            session_id,
            action,
            code: None,
            payload,
            state: Some(state),
        }
    }

    pub fn error(session_id: SessionId, err: &GameError) -> Self {
        Self {
            session_id,
            action: Action::Error,
            code: Some(err.code().as_str().to_string()),
            payload: err.to_string(),
            state: None,
        }
    }
}
