//! Automated opponent - picks the computer's letters.
//!
//! This module provides:
//! - `TextGenerator` trait for external free-text models
//! - `GeminiClient`: HTTP generator backed by Gemini
//! - `GuessAdvisor`: validated suggestion with frequency fallback

pub mod advisor;
pub mod gemini;
mod trait_def;

pub use advisor::{fallback_letter, GuessAdvisor, DEFAULT_ADVISOR_TIMEOUT, LETTER_FREQUENCY};
pub use gemini::GeminiClient;
pub use trait_def::{AdvisorError, TextGenerator};
