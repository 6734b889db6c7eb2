//! Error handling for the word duel backend.

pub mod domain;
pub mod error_code;

#[cfg(test)]
mod tests_error_mapping;

pub use domain::GameError;
pub use error_code::ErrorCode;
