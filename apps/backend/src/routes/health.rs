use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    sessions: usize,
    connections: usize,
}

async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        sessions: app_state.sessions().len(),
        connections: app_state.connections().active_connections_count(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(health)));
}
