use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::error;

use crate::error::AppError;
use crate::state::app_state::AppState;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

async fn leaderboard(
    query: web::Query<LeaderboardQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = app_state
        .game_flow()
        .leaderboard(limit)
        .await
        .map_err(|err| {
            error!(error = %err, "Leaderboard read failed");
            AppError::internal("Leaderboard unavailable")
        })?;
    Ok(HttpResponse::Ok().json(entries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(leaderboard)));
}
