#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::ServerConfig;
pub use domain::{Session, SessionId, Slot};
pub use error::AppError;
pub use errors::{ErrorCode, GameError};
pub use extractors::{CurrentUser, HandshakeClaims, SessionPath};
pub use services::game_flow::{ConnectionContext, GameDefaults, GameFlowService};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
