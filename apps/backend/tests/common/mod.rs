#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use backend::adapters::{FixedWordSource, InMemoryLedger};
use backend::ai::GuessAdvisor;
use backend::services::game_flow::GameDefaults;
use backend::state::app_state::AppState;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_WORD: &str = "apple";

/// State with a fixed word, an in-memory ledger and a frequency-only
/// computer opponent. Returned alongside the ledger so tests can inspect it.
pub fn test_state() -> (AppState, Arc<InMemoryLedger>) {
    test_state_with_word(TEST_WORD)
}

pub fn test_state_with_word(word: &str) -> (AppState, Arc<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::new());
    let state = AppState::assemble(
        GuessAdvisor::frequency_only(),
        ledger.clone(),
        Arc::new(FixedWordSource::new(word)),
        GameDefaults::default(),
    );
    (state, ledger)
}
