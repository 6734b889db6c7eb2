use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const USER_COOKIE: &str = "user";
pub const USER_HEADER: &str = "x-user";

/// Opaque caller identity, taken from the `user` cookie or the `x-user`
/// header. No verification happens here; identities are trusted as given.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
}

impl CurrentUser {
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        let from_cookie = req.cookie(USER_COOKIE).map(|c| c.value().to_string());
        let from_header = || {
            req.headers()
                .get(USER_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        from_cookie
            .or_else(from_header)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| Self { name })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_req(req).ok_or_else(AppError::unauthorized))
    }
}
