//! Ranked ledger: win counts and best scores per player.
//!
//! A score is the number of incorrect guesses in a won game, so lower is
//! better. Ranking is wins descending, best score ascending, name ascending.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub username: String,
    pub wins: u32,
    pub best_score: u32,
}

#[async_trait]
pub trait RankedLedger: Send + Sync {
    async fn record_win(&self, identity: &str, incorrect_guesses: u32) -> Result<(), LedgerError>;
    async fn top(&self, limit: usize) -> Result<Vec<LedgerEntry>, LedgerError>;
}

#[derive(Default)]
pub struct InMemoryLedger {
    entries: Mutex<HashMap<String, LedgerEntry>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankedLedger for InMemoryLedger {
    async fn record_win(&self, identity: &str, incorrect_guesses: u32) -> Result<(), LedgerError> {
        let mut entries = self.entries.lock();
        entries
            .entry(identity.to_string())
            .and_modify(|e| {
                e.wins += 1;
                e.best_score = e.best_score.min(incorrect_guesses);
            })
            .or_insert_with(|| LedgerEntry {
                username: identity.to_string(),
                wins: 1,
                best_score: incorrect_guesses,
            });
        Ok(())
    }

    async fn top(&self, limit: usize) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut ranked: Vec<LedgerEntry> = self.entries.lock().values().cloned().collect();
        ranked.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(a.best_score.cmp(&b.best_score))
                .then_with(|| a.username.cmp(&b.username))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }
}
