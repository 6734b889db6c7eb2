use actix_web::cookie::Cookie;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::session::Slot;
use crate::domain::snapshot::StateView;
use crate::domain::SessionId;
use crate::error::AppError;
use crate::extractors::connection_context::{ROLE_COOKIE, SESSION_COOKIE};
use crate::extractors::current_user::CurrentUser;
use crate::extractors::session_path::SessionPath;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub word_length: Option<i64>,
    pub max_incorrect: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub role: Slot,
    pub state: StateView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
}

/// Respond with the seat and remember it in cookies for the socket handshake.
fn seated(session_id: SessionId, role: Slot, state: StateView) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(Cookie::build(SESSION_COOKIE, session_id.to_string()).path("/").finish())
        .cookie(Cookie::build(ROLE_COOKIE, role.as_str()).path("/").finish())
        .json(SessionResponse {
            session_id,
            role,
            state,
        })
}

async fn create(
    user: CurrentUser,
    body: Option<web::Json<CreateSessionRequest>>,
    app_state: web::Data<AppState>,
    vs_ai: bool,
) -> Result<HttpResponse, AppError> {
    let req = body.map(web::Json::into_inner).unwrap_or_default();
    let created = app_state
        .game_flow()
        .create_session(&user.name, req.word_length, req.max_incorrect, vs_ai)
        .await?;
    Ok(seated(created.session_id, created.role, created.state))
}

async fn create_human(
    user: CurrentUser,
    body: Option<web::Json<CreateSessionRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    create(user, body, app_state, false).await
}

async fn create_vs_ai(
    user: CurrentUser,
    body: Option<web::Json<CreateSessionRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    create(user, body, app_state, true).await
}

async fn join(
    user: CurrentUser,
    path: SessionPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let SessionPath(session_id) = path;
    let state = app_state.game_flow().join(&session_id, &user.name)?;
    Ok(seated(session_id, Slot::B, state))
}

async fn get_state(
    user: CurrentUser,
    path: SessionPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.game_flow().view_for_user(&path.0, &user.name)?;
    Ok(HttpResponse::Ok().json(view))
}

async fn hint(
    user: CurrentUser,
    path: SessionPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let hint = app_state.game_flow().issue_hint(&path.0, &user.name)?;
    Ok(HttpResponse::Ok().json(HintResponse { hint }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_human)));
    cfg.service(web::resource("/ai").route(web::post().to(create_vs_ai)));
    cfg.service(web::resource("/{session_id}").route(web::get().to(get_state)));
    cfg.service(web::resource("/{session_id}/join").route(web::post().to(join)));
    cfg.service(web::resource("/{session_id}/hint").route(web::post().to(hint)));
}
