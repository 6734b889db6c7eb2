//! Handshake context for WebSocket upgrades.
//!
//! Identity, session id and role are read from cookies first and from the
//! upgrade request's query string second. Whether the identity really holds
//! the role is decided later by the game flow service.

use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::domain::session::Slot;
use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::USER_COOKIE;

pub const SESSION_COOKIE: &str = "session_id";
pub const ROLE_COOKIE: &str = "role";
const LEGACY_SESSION_COOKIE: &str = "game_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeClaims {
    pub user: String,
    pub session_id: SessionId,
    pub role: Option<Slot>,
}

impl HandshakeClaims {
    pub fn from_req(req: &HttpRequest) -> Result<Self, AppError> {
        let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default();

        let lookup = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .find_map(|key| req.cookie(key).map(|c| c.value().to_string()))
                .or_else(|| keys.iter().find_map(|key| query.get(*key).cloned()))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let user = lookup(&[USER_COOKIE]).ok_or_else(AppError::unauthorized)?;

        let raw_session = lookup(&[SESSION_COOKIE, LEGACY_SESSION_COOKIE]).ok_or_else(|| {
            AppError::bad_request(ErrorCode::BadRequest, "Missing session id")
        })?;
        let session_id = SessionId::parse(&raw_session)?;

        let role = match lookup(&[ROLE_COOKIE]) {
            None => None,
            Some(raw) => Some(Slot::parse(&raw).ok_or_else(|| {
                AppError::bad_request(ErrorCode::BadRequest, format!("Unknown role '{raw}'"))
            })?),
        };

        Ok(Self {
            user,
            session_id,
            role,
        })
    }
}

impl FromRequest for HandshakeClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_req(req))
    }
}
