use actix_web::web;

pub mod health;
pub mod leaderboard;
pub mod realtime;
pub mod sessions;

/// Register every route. Used by `main.rs` and by the test harnesses, so
/// both see identical paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Session routes: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));

    // Leaderboard: /api/leaderboard
    cfg.service(web::scope("/api/leaderboard").configure(leaderboard::configure_routes));

    // Realtime: /ws
    cfg.configure(realtime::configure_routes);
}
