use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::middleware::RequestLog;
use backend::routes;
use backend::services::eviction::spawn_idle_sweeper;
use backend::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set, computer opponent uses letter frequency only");
    }

    let app_state = AppState::from_config(&config);
    let sweeper = spawn_idle_sweeper(
        app_state.game_flow(),
        config.session_idle_ttl,
        config.sweep_interval,
    );

    info!(host = %config.host, port = config.port, "Starting word duel backend");

    let data = web::Data::new(app_state);
    let result = HttpServer::new(move || {
        App::new()
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    sweeper.abort();
    result
}
