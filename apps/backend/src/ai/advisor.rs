//! Guess advisor for the automated opponent.
//!
//! Asks the text generator first, then walks a fixed English letter
//! frequency order, and as a last resort picks any unguessed letter at
//! random. `next_letter` never fails while an unguessed letter exists.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::ai::trait_def::{AdvisorError, TextGenerator};
use crate::domain::player_view::AdvisorView;

/// Most frequent English letters first.
pub const LETTER_FREQUENCY: &str = "etaoinshrdlcumwfgypbvkjxqz";

pub const DEFAULT_ADVISOR_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone)]
pub struct GuessAdvisor {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl GuessAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
        }
    }

    /// Advisor with no generator: frequency order only.
    pub fn frequency_only() -> Self {
        Self {
            generator: None,
            timeout: DEFAULT_ADVISOR_TIMEOUT,
        }
    }

    /// Pick the computer's next letter. Returns `None` only when all 26
    /// letters are already guessed.
    pub async fn next_letter(&self, view: &AdvisorView) -> Option<char> {
        match self.ask_generator(view).await {
            Ok(letter) => {
                debug!(letter = %letter, "Advisor suggestion accepted");
                return Some(letter);
            }
            Err(AdvisorError::Unavailable) => {}
            Err(err) => warn!(error = %err, "Advisor failed, using frequency fallback"),
        }
        fallback_letter(view)
    }

    async fn ask_generator(&self, view: &AdvisorView) -> Result<char, AdvisorError> {
        let generator = self.generator.as_ref().ok_or(AdvisorError::Unavailable)?;
        let prompt = build_prompt(view);

        let text = tokio::time::timeout(self.timeout, generator.complete(&prompt, self.timeout))
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout))??;

        validate_suggestion(&text, view)
    }
}

pub fn build_prompt(view: &AdvisorView) -> String {
    format!(
        "You're playing Hangman. Known word: '{}'. Letters guessed: [{}]. \
         Suggest ONE new lowercase letter (a-z) that has not been guessed.",
        view.display_word,
        view.guessed_list()
    )
}

/// Accept the first character of the response if it is a fresh letter.
fn validate_suggestion(text: &str, view: &AdvisorView) -> Result<char, AdvisorError> {
    let first = text
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .ok_or_else(|| AdvisorError::Malformed("empty response".to_string()))?;

    if !first.is_ascii_lowercase() {
        return Err(AdvisorError::Malformed(format!("'{first}' is not a letter")));
    }
    if view.has_guessed(first) {
        return Err(AdvisorError::Malformed(format!("'{first}' already guessed")));
    }
    Ok(first)
}

/// Highest-frequency unguessed letter, or a random unguessed letter if the
/// frequency list is somehow exhausted.
pub fn fallback_letter(view: &AdvisorView) -> Option<char> {
    if let Some(letter) = LETTER_FREQUENCY.chars().find(|c| !view.has_guessed(*c)) {
        return Some(letter);
    }
    let unguessed: Vec<char> = ('a'..='z').filter(|c| !view.has_guessed(*c)).collect();
    unguessed.choose(&mut rand::rng()).copied()
}
