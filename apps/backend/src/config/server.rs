//! Process configuration read from the environment.
//!
//! Environment variables must be set by the runtime environment:
//! - Docker: via `env_file` or `docker run --env-file`
//! - Local dev: source env files manually (e.g. `set -a; . ./.env; set +a`)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::word_source::DEFAULT_WORD_API_URL;
use crate::error::AppError;
use crate::services::game_flow::GameDefaults;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub word_api_url: String,
    /// Unset disables the external advisor.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub advisor_timeout: Duration,
    pub session_idle_ttl: Duration,
    pub sweep_interval: Duration,
    pub defaults: GameDefaults,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any name-to-value lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let text = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: text("BACKEND_HOST", "0.0.0.0"),
            port: parse_var(&get, "BACKEND_PORT", 3001)?,
            word_api_url: text("WORD_API_URL", DEFAULT_WORD_API_URL),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: text("GEMINI_MODEL", "gemini-1.5-flash"),
            advisor_timeout: Duration::from_secs(parse_var(&get, "ADVISOR_TIMEOUT_SECS", 20)?),
            session_idle_ttl: Duration::from_secs(parse_var(&get, "SESSION_IDLE_TTL_SECS", 3600)?),
            sweep_interval: Duration::from_secs(
                parse_var(&get, "SESSION_SWEEP_INTERVAL_SECS", 60)?.max(1),
            ),
            defaults: GameDefaults {
                word_length: parse_var(&get, "DEFAULT_WORD_LENGTH", 5)?,
                max_incorrect: parse_var(&get, "DEFAULT_MAX_INCORRECT", 7)?,
            },
        })
    }
}

fn parse_var<T, F>(get: &F, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} must be a number, got '{raw}'"))),
    }
}
