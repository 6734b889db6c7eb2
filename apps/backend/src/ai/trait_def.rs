//! Text-generation collaborator trait definition.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the external text-generation collaborator.
///
/// These never reach a player: the advisor logs them and falls back.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The call did not finish within its timeout
    #[error("advisor call timed out after {0:?}")]
    Timeout(Duration),
    /// Transport failure or non-success status
    #[error("advisor request failed: {0}")]
    Transport(String),
    /// Response arrived but had no usable text
    #[error("advisor response malformed: {0}")]
    Malformed(String),
    /// No generator configured
    #[error("advisor unavailable")]
    Unavailable,
}

/// Trait for free-text generators.
///
/// Implementations receive a prompt and return whatever text the model
/// produced. Callers must validate the text; nothing about its shape is
/// guaranteed.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, AdvisorError>;
}
