use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Session id extracted from the `{session_id}` path parameter.
/// Only the shape is validated; existence is checked by the service.
#[derive(Debug, Clone)]
pub struct SessionPath(pub SessionId);

impl FromRequest for SessionPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("session_id") {
            None => Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "Missing session_id parameter",
            )),
            Some(raw) => SessionId::parse(raw)
                .map(SessionPath)
                .map_err(AppError::from),
        };
        ready(result)
    }
}
