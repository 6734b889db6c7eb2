// WebSocket test utilities

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend::middleware::RequestLog;
use backend::routes;
use backend::state::app_state::AppState;
use backend::ws::ConnectionRegistry;

pub async fn wait_for_connections(
    registry: &ConnectionRegistry,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if registry.active_connections_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for active_connections_count == {expected} (got {})",
                registry.active_connections_count()
            )
            .into());
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Handshake URL carrying the identity, session and role as query values.
pub fn ws_url(addr: std::net::SocketAddr, user: &str, session_id: &str, role: Option<&str>) -> String {
    let mut url = format!("ws://{addr}/ws?user={user}&session_id={session_id}");
    if let Some(role) = role {
        url.push_str("&role=");
        url.push_str(role);
    }
    url
}

/// Start a real HTTP server on a random port with the production routes.
///
/// # Returns
/// Returns a tuple of (server_handle, socket_addr, join_handle) where:
/// - `server_handle` can be used to gracefully stop the server
/// - `socket_addr` is the address the server is listening on
/// - `join_handle` can be awaited to wait for server shutdown and check for errors
pub async fn start_test_server(
    state: AppState,
) -> Result<
    (
        actix_web::dev::ServerHandle,
        std::net::SocketAddr,
        tokio::task::JoinHandle<Result<(), std::io::Error>>,
    ),
    Box<dyn std::error::Error>,
> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(RequestLog)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let server_handle = server.handle();
    let join = tokio::spawn(server);

    Ok((server_handle, addr, join))
}
