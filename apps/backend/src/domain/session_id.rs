//! Session identifiers.
//!
//! A session id is a 4-character token of lowercase ASCII letters. Ids are
//! short enough to read out loud to an opponent, which also means collisions
//! happen; the registry is responsible for retrying on a clash.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::domain::GameError;

pub const SESSION_ID_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a random id. Uniqueness is NOT guaranteed.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let token: String = (0..SESSION_ID_LEN)
            .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
            .collect();
        Self(token)
    }

    pub fn parse(raw: &str) -> Result<Self, GameError> {
        let trimmed = raw.trim();
        let valid = trimmed.len() == SESSION_ID_LEN
            && trimmed.bytes().all(|b| b.is_ascii_lowercase());
        if !valid {
            return Err(GameError::InvalidSessionId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
